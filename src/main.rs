// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use ledgerclip::{api::ApiClient, cli, commands, config::Config, session::Session};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ledgerclip=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let config = Config::resolve(matches.get_one::<String>("api-url").map(String::as_str));
    let session = Arc::new(Session::open_default()?);
    let api = ApiClient::new(&config.api_url, session.clone())?;

    // Everything except the auth commands needs a stored token.
    let needs_auth = !matches!(
        matches.subcommand(),
        Some(("login", _)) | Some(("register", _)) | Some(("logout", _)) | None
    );
    if needs_auth && !session.is_authenticated() {
        println!("Not logged in. Run 'ledgerclip login' first.");
        return Ok(());
    }

    match matches.subcommand() {
        Some(("login", sub)) => commands::auth::login(&api, &session, sub)?,
        Some(("register", sub)) => commands::auth::register(&api, &session, sub)?,
        Some(("logout", _)) => commands::auth::logout(&session)?,
        Some(("whoami", _)) => commands::auth::whoami(&api)?,
        Some(("ledgers", sub)) => commands::ledgers::handle(&api, &session, sub)?,
        Some(("member", sub)) => commands::members::handle(&api, &session, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&api, &session, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&api, &session, sub)?,
        Some(("analytics", sub)) => commands::analytics::handle(&api, &session, sub)?,
        Some(("settle", sub)) => commands::settlement::handle(&api, &session, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
