// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, bail, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;

use crate::api::ApiClient;
use crate::commands::SESSION_EXPIRED;
use crate::models::{Transaction, TransactionDetail};
use crate::session::Session;
use crate::splits::{build_splits, SplitRow, METHOD_EQUAL};
use crate::state::{self, TxnFilter};
use crate::utils::{
    maybe_print_json, parse_date, parse_datetime_input, parse_decimal, pretty_table,
};

pub fn handle(api: &ApiClient, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(api, session, sub)?,
        Some(("add", sub)) => add(api, session, sub)?,
        Some(("show", sub)) => show(api, session, sub)?,
        Some(("rm", sub)) => rm(api, session, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub txn_type: String,
    pub amount: String,
    pub currency: String,
    pub payer: String,
    pub note: String,
}

fn to_row(t: &Transaction) -> TransactionRow {
    TransactionRow {
        id: t.id,
        date: t.txn_at.clone().unwrap_or_default(),
        txn_type: t.txn_type.clone(),
        amount: t.amount_total.fmt(),
        currency: t.currency.clone(),
        payer: t.payer_id.map(|id| id.to_string()).unwrap_or_default(),
        note: t.note.clone().unwrap_or_default(),
    }
}

fn list(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let ledger_id = session.require_current_ledger()?;
    let filter = TxnFilter {
        from: sub
            .get_one::<String>("from")
            .map(|s| parse_date(s))
            .transpose()?,
        to: sub
            .get_one::<String>("to")
            .map(|s| parse_date(s))
            .transpose()?,
        txn_type: sub.get_one::<String>("type").cloned(),
    };
    let Some(txns) = state::fetch_transactions(api, ledger_id, &filter)? else {
        println!("{}", SESSION_EXPIRED);
        return Ok(());
    };
    let data: Vec<TransactionRow> = txns.iter().map(to_row).collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.txn_type.clone(),
                    r.amount.clone(),
                    r.currency.clone(),
                    r.payer.clone(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Amount", "CCY", "Payer", "Note"],
                rows,
            )
        );
    }
    Ok(())
}

fn split_rows(sub: &clap::ArgMatches) -> Result<Vec<SplitRow>> {
    if let Some(entries) = sub.get_many::<String>("split") {
        return entries
            .map(|e| {
                let (user, value) = e
                    .split_once('=')
                    .ok_or_else(|| anyhow!("Invalid split '{}', expected USER_ID=VALUE", e))?;
                Ok(SplitRow {
                    user_id: user.trim().parse::<i64>().map_err(|_| {
                        anyhow!("Invalid split user id '{}'", user)
                    })?,
                    value: value.to_string(),
                })
            })
            .collect();
    }
    if let Some(list) = sub.get_one::<String>("participants") {
        return list
            .split(',')
            .filter(|p| !p.trim().is_empty())
            .map(|p| {
                Ok(SplitRow {
                    user_id: p
                        .trim()
                        .parse::<i64>()
                        .map_err(|_| anyhow!("Invalid participant id '{}'", p))?,
                    value: String::new(),
                })
            })
            .collect();
    }
    Ok(Vec::new())
}

fn add(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let ledger_id = session.require_current_ledger()?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    if amount <= Decimal::ZERO {
        bail!("Amount must be > 0.");
    }
    let txn_type = sub.get_one::<String>("type").unwrap();
    let currency = sub.get_one::<String>("currency").unwrap();
    let payer = *sub.get_one::<i64>("payer").unwrap();
    let category = sub.get_one::<i64>("category").copied();
    let note = sub.get_one::<String>("note");
    let method = sub.get_one::<String>("method").unwrap();

    let txn_at = match sub.get_one::<String>("date") {
        Some(s) => parse_datetime_input(s)?,
        None => chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
    };

    let rows = split_rows(sub)?;
    if method != METHOD_EQUAL && rows.is_empty() {
        bail!("Method {} needs at least one --split USER_ID=VALUE.", method);
    }
    let splits = build_splits(method, &rows);

    let mut body = json!({
        "type": txn_type,
        "currency": currency,
        "amount_total": amount,
        "txn_at": txn_at,
        "payer_id": payer,
        "note": note,
        "rounding_strategy": "ROUND_HALF_UP",
        "tail_allocation": "PAYER",
        "splits": splits,
    });
    if let Some(cat) = category {
        body["category_id"] = json!(cat);
    }

    let path = format!("/api/v1/ledgers/{}/transactions", ledger_id);
    let Some(data) = api.post(&path, &body)? else {
        println!("{}", SESSION_EXPIRED);
        return Ok(());
    };
    let txn = Transaction::from_value(&data);
    println!(
        "Recorded {} {} {} on {} (id: {})",
        txn_type,
        amount,
        currency,
        txn.txn_at.as_deref().unwrap_or(&txn_at),
        txn.id
    );
    Ok(())
}

fn show(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let ledger_id = session.require_current_ledger()?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let path = format!("/api/v1/ledgers/{}/transactions/{}", ledger_id, id);
    let Some(data) = api.get(&path)? else {
        println!("{}", SESSION_EXPIRED);
        return Ok(());
    };
    let detail = TransactionDetail::from_value(&data);
    let t = &detail.txn;

    println!(
        "Transaction {}: {} {} {}",
        t.id,
        t.txn_type,
        t.amount_total.fmt(),
        t.currency
    );
    if let Some(at) = &t.txn_at {
        println!("At: {}", at);
    }
    if let Some(note) = &t.note {
        println!("Note: {}", note);
    }
    if let Some(rs) = &detail.rounding_strategy {
        let tail = detail.tail_allocation.as_deref().unwrap_or("-");
        println!("Rounding: {} • Tail: {}", rs, tail);
    }
    if !detail.splits.is_empty() {
        let rows: Vec<Vec<String>> = detail
            .splits
            .iter()
            .map(|s| {
                vec![
                    s.user_name
                        .clone()
                        .unwrap_or_else(|| format!("User {}", s.user_id)),
                    s.method.clone(),
                    s.value_label(),
                    s.amount.fmt(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Member", "Method", "Value", "Amount"], rows)
        );
    }
    Ok(())
}

fn rm(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let ledger_id = session.require_current_ledger()?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let path = format!("/api/v1/ledgers/{}/transactions/{}", ledger_id, id);
    if api.delete(&path)?.is_none() {
        println!("{}", SESSION_EXPIRED);
        return Ok(());
    }
    println!("Deleted transaction {}", id);
    Ok(())
}
