// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde_json::json;

use crate::api::ApiClient;
use crate::commands::SESSION_EXPIRED;
use crate::models::Ledger;
use crate::session::Session;
use crate::state::{self, LedgerState};
use crate::utils::{maybe_print_json, parse_date, pretty_table};

pub fn handle(api: &ApiClient, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(api, session, sub)?,
        Some(("use", sub)) => use_ledger(api, session, sub)?,
        Some(("show", _)) => show(api, session)?,
        Some(("create", sub)) => create(api, sub)?,
        _ => {}
    }
    Ok(())
}

fn print_ledgers(ledgers: &[Ledger], selected: Option<i64>) {
    let rows: Vec<Vec<String>> = ledgers
        .iter()
        .map(|l| {
            vec![
                if selected == Some(l.id) { "*" } else { "" }.to_string(),
                l.id.to_string(),
                l.name.clone(),
                l.ledger_type.clone(),
                l.base_currency.clone(),
                l.role.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["", "ID", "Name", "Type", "CCY", "Role"], rows)
    );
}

fn list(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let mut st = LedgerState::new();
    let selected = st.load_ledgers(api, session.current_ledger())?;
    // A 401 clears the session on the way through the transport.
    if !session.is_authenticated() {
        println!("{}", SESSION_EXPIRED);
        return Ok(());
    }
    if st.ledgers.is_empty() {
        println!("No ledgers yet. Create one with 'ledgerclip ledgers create'.");
        return Ok(());
    }
    if let Some(id) = selected {
        if session.current_ledger() != Some(id) {
            session.set_current_ledger(id)?;
        }
    }
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &st.ledgers)? {
        return Ok(());
    }
    print_ledgers(&st.ledgers, selected);
    Ok(())
}

fn use_ledger(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut st = LedgerState::new();
    st.select_ledger(api, id)?;
    session.set_current_ledger(id)?;
    println!("Using ledger {} ({})", id, st.meta.summary());
    Ok(())
}

fn show(api: &ApiClient, session: &Session) -> Result<()> {
    let id = session.require_current_ledger()?;
    let Some(meta) = state::fetch_meta(api, id)? else {
        println!("{}", SESSION_EXPIRED);
        return Ok(());
    };
    println!("Ledger {}: {}", id, meta.summary());
    if !meta.categories.is_empty() {
        let rows: Vec<Vec<String>> = meta
            .categories
            .iter()
            .map(|c| vec![c.id.to_string(), c.name.clone(), c.kind.clone()])
            .collect();
        println!("{}", pretty_table(&["ID", "Category", "Kind"], rows));
    }
    Ok(())
}

fn create(api: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let ledger_type = sub.get_one::<String>("type").unwrap();
    let currency = sub.get_one::<String>("currency").unwrap();
    let start_date = match sub.get_one::<String>("start-date") {
        Some(s) => parse_date(s)?.to_string(),
        None => chrono::Local::now().date_naive().to_string(),
    };
    let categories: Vec<_> = sub
        .get_many::<String>("category")
        .unwrap()
        .map(|n| json!({ "name": n, "kind": "EXPENSE", "is_active": true }))
        .collect();

    let body = json!({
        "name": name,
        "ledger_type": ledger_type,
        "base_currency": currency,
        "share_start_date": start_date,
        "categories": categories,
    });
    let Some(data) = api.post("/api/v1/ledgers", &body)? else {
        println!("{}", SESSION_EXPIRED);
        return Ok(());
    };
    let ledger = Ledger::from_value(&data);
    println!("Created ledger {} (id: {})", ledger.name, ledger.id);
    Ok(())
}
