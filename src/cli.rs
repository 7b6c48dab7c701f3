// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("ledgerclip")
        .about("CLI client for a shared-ledger service")
        .version(crate_version!())
        .arg_required_else_help(false)
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .global(true)
                .help("Base URL of the ledger service (overrides LEDGERCLIP_API_URL)"),
        )
        .subcommand(
            Command::new("login")
                .about("Log in and store the access token")
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("password").long("password").required(true)),
        )
        .subcommand(
            Command::new("register")
                .about("Create an account, then log in")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("password").long("password").required(true)),
        )
        .subcommand(Command::new("logout").about("Forget the stored session"))
        .subcommand(Command::new("whoami").about("Show the logged-in user"))
        .subcommand(
            Command::new("ledgers")
                .about("List, select, and create ledgers")
                .subcommand(json_flags(Command::new("list").about("List your ledgers")))
                .subcommand(
                    Command::new("use")
                        .about("Select the working ledger")
                        .arg(Arg::new("id").required(true).value_parser(clap::value_parser!(i64))),
                )
                .subcommand(Command::new("show").about("Show the selected ledger"))
                .subcommand(
                    Command::new("create")
                        .about("Create a ledger with its expense categories")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("type").long("type").default_value("GROUP"))
                        .arg(Arg::new("currency").long("currency").default_value("USD"))
                        .arg(
                            Arg::new("start-date")
                                .long("start-date")
                                .help("Share start date, YYYY-MM-DD, defaults to today"),
                        )
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .action(ArgAction::Append)
                                .required(true)
                                .help("Expense category name (repeatable)"),
                        ),
                ),
        )
        .subcommand(
            Command::new("member")
                .about("Manage members of the selected ledger")
                .subcommand(json_flags(Command::new("list").about("List members")))
                .subcommand(
                    Command::new("add")
                        .about("Add a member by email")
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("role").long("role").default_value("EDITOR")),
                )
                .subcommand(
                    Command::new("remove")
                        .about("Remove a member")
                        .arg(
                            Arg::new("user-id")
                                .required(true)
                                .value_parser(clap::value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions in the selected ledger")
                        .arg(Arg::new("from").long("from").help("From date, YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").help("To date, YYYY-MM-DD"))
                        .arg(Arg::new("type").long("type").help("EXPENSE, INCOME, or TRANSFER")),
                ))
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction with its splits")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("type").long("type").default_value("EXPENSE"))
                        .arg(Arg::new("currency").long("currency").default_value("USD"))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS, defaults to now"),
                        )
                        .arg(
                            Arg::new("payer")
                                .long("payer")
                                .required(true)
                                .value_parser(clap::value_parser!(i64))
                                .help("Member user id who paid"),
                        )
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .value_parser(clap::value_parser!(i64))
                                .help("Category id"),
                        )
                        .arg(Arg::new("note").long("note"))
                        .arg(
                            Arg::new("method")
                                .long("method")
                                .default_value("EQUAL")
                                .help("EQUAL, EXACT, PERCENT, or WEIGHT"),
                        )
                        .arg(
                            Arg::new("split")
                                .long("split")
                                .action(ArgAction::Append)
                                .help("Participant share as USER_ID=VALUE (repeatable)"),
                        )
                        .arg(
                            Arg::new("participants")
                                .long("participants")
                                .help("Comma-separated member ids for an equal split"),
                        ),
                )
                .subcommand(
                    Command::new("show")
                        .about("Show a transaction with its split allocation")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(clap::value_parser!(i64)),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(clap::value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Budget status and limits for the selected ledger")
                .subcommand(json_flags(
                    Command::new("status")
                        .about("Show budget status for a month")
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .value_parser(clap::value_parser!(i32)),
                        )
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .value_parser(clap::value_parser!(u32)),
                        )
                        .arg(
                            Arg::new("from")
                                .long("from")
                                .help("Take year and month from this date, YYYY-MM-DD"),
                        ),
                ))
                .subcommand(
                    Command::new("set")
                        .about("Set a monthly limit, ledger-wide or per category")
                        .arg(Arg::new("limit").long("limit").required(true))
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .value_parser(clap::value_parser!(i32)),
                        )
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .value_parser(clap::value_parser!(u32)),
                        )
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .value_parser(clap::value_parser!(i64))
                                .help("Category id; omit for a ledger-wide budget"),
                        ),
                ),
        )
        .subcommand(
            Command::new("analytics")
                .about("Charts, totals, alerts, and balances for the selected ledger")
                .arg(
                    Arg::new("months")
                        .long("months")
                        .default_value("3")
                        .value_parser(clap::value_parser!(u32)),
                ),
        )
        .subcommand(
            Command::new("settle")
                .about("Settlement plans")
                .subcommand(
                    Command::new("plan")
                        .about("Compute who pays whom")
                        .arg(
                            Arg::new("rounding")
                                .long("rounding")
                                .help("Rounding strategy, e.g. ROUND_HALF_UP"),
                        )
                        .arg(
                            Arg::new("max-transfer")
                                .long("max-transfer")
                                .help("Cap on a single transfer amount"),
                        )
                        .arg(
                            Arg::new("min-cost-flow")
                                .long("min-cost-flow")
                                .action(ArgAction::SetTrue)
                                .help("Force the min-cost-flow solver"),
                        )
                        .arg(
                            Arg::new("threshold")
                                .long("threshold")
                                .help("Min-cost-flow activation threshold"),
                        ),
                ),
        )
}
