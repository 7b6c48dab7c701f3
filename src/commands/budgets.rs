// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;

use crate::analytics::budget_banner;
use crate::api::ApiClient;
use crate::commands::SESSION_EXPIRED;
use crate::models::BudgetStatusItem;
use crate::normalize::Scalar;
use crate::session::Session;
use crate::state;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(api: &ApiClient, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("status", sub)) => status(api, session, sub)?,
        Some(("set", sub)) => set(api, session, sub)?,
        _ => {}
    }
    Ok(())
}

/// The budget period: explicit flags win, then the `--from` date, then the
/// current month.
fn period(sub: &clap::ArgMatches) -> Result<(i32, u32)> {
    if let (Some(y), Some(m)) = (sub.get_one::<i32>("year"), sub.get_one::<u32>("month")) {
        return Ok((*y, *m));
    }
    // Only the status subcommand carries --from.
    if let Ok(Some(from)) = sub.try_get_one::<String>("from") {
        let d = parse_date(from)?;
        return Ok((d.year(), d.month()));
    }
    let today = chrono::Local::now().date_naive();
    Ok((today.year(), today.month()))
}

#[derive(Serialize)]
struct BudgetRow {
    category: String,
    limit: String,
    spent: String,
    ratio: String,
    status: String,
}

fn to_row(b: &BudgetStatusItem) -> BudgetRow {
    let ratio = match b.ratio {
        Some(r) => format!("{:.1}%", r * Decimal::ONE_HUNDRED),
        None => "-".to_string(),
    };
    BudgetRow {
        category: b
            .category_name
            .clone()
            .unwrap_or_else(|| "Ledger".to_string()),
        limit: format!("{:.2}", b.limit_amount),
        spent: b.spent_amount.fmt(),
        ratio,
        status: b.status.clone(),
    }
}

fn status(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let ledger_id = session.require_current_ledger()?;
    let (year, month) = period(sub)?;
    let Some(items) = state::fetch_budget_status(api, ledger_id, year, month)? else {
        println!("{}", SESSION_EXPIRED);
        return Ok(());
    };
    let data: Vec<BudgetRow> = items.iter().map(to_row).collect();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    println!("Budget status for {}-{:02}", year, month);
    if !items.is_empty() {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.category.clone(),
                    r.limit.clone(),
                    r.spent.clone(),
                    r.ratio.clone(),
                    r.status.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Limit", "Spent", "Used", "Status"], rows)
        );
    }
    println!("{}", budget_banner(&items, &Scalar::Missing));
    Ok(())
}

fn set(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let ledger_id = session.require_current_ledger()?;
    let limit = parse_decimal(sub.get_one::<String>("limit").unwrap())?;
    if limit <= Decimal::ZERO {
        bail!("Limit must be > 0.");
    }
    let (year, month) = period(sub)?;
    let category = sub.get_one::<i64>("category").copied();

    // A null category_id means the budget covers the whole ledger.
    let body = json!({
        "category_id": category,
        "year": year,
        "month": month,
        "limit_amount": limit,
    });

    let path = format!("/api/v1/ledgers/{}/budgets", ledger_id);
    if api.post(&path, &body)?.is_none() {
        println!("{}", SESSION_EXPIRED);
        return Ok(());
    }
    match category {
        Some(cat) => println!(
            "Budget set for {}-{:02} category {} = {}",
            year, month, cat, limit
        ),
        None => println!("Ledger budget set for {}-{:02} = {}", year, month, limit),
    }
    Ok(())
}
