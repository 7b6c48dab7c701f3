// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Datelike;
use tracing::warn;

use crate::analytics::{budget_alert, budget_banner, derive_totals};
use crate::api::ApiClient;
use crate::charts::{ChartKind, ChartSlot, ChartSlots, ChartSpec, Series, TermSurface};
use crate::commands::SESSION_EXPIRED;
use crate::models::AnalyticsSnapshot;
use crate::session::Session;
use crate::state::{self, LedgerState};
use crate::utils::pretty_table;

pub fn handle(api: &ApiClient, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    let ledger_id = session.require_current_ledger()?;
    let months = *m.get_one::<u32>("months").unwrap();
    let today = chrono::Local::now().date_naive();

    let mut st = LedgerState::new();
    let ticket = st.begin_refresh(ledger_id);

    let (analytics, budgets) = std::thread::scope(|s| {
        let analytics = s.spawn(|| state::fetch_analytics(api, ledger_id, months));
        let budgets =
            s.spawn(|| state::fetch_budget_status(api, ledger_id, today.year(), today.month()));
        (analytics.join(), budgets.join())
    });

    match analytics.unwrap_or_else(|_| {
        Err(crate::api::ApiError::Application(
            "refresh worker panicked".to_string(),
        ))
    }) {
        Ok(Some(snap)) => {
            st.apply_analytics(ticket, snap);
        }
        Ok(None) => {
            println!("{}", SESSION_EXPIRED);
            return Ok(());
        }
        Err(e) => warn!(error = %e, "analytics refresh failed"),
    }
    match budgets.unwrap_or_else(|_| {
        Err(crate::api::ApiError::Application(
            "refresh worker panicked".to_string(),
        ))
    }) {
        Ok(Some(items)) => {
            st.apply_budget_status(ticket, items);
        }
        Ok(None) => {}
        Err(e) => warn!(error = %e, "budget status refresh failed"),
    }

    let snap = st.analytics.clone().unwrap_or_default();
    render(&snap, &st);
    Ok(())
}

fn render(snap: &AnalyticsSnapshot, st: &LedgerState) {
    if let (Some(rs), Some(re)) = (&snap.range_start, &snap.range_end) {
        println!("Range: {} → {} (end exclusive)", rs, re);
    }

    let totals = derive_totals(snap);
    let rows = vec![vec![
        totals.income.fmt(),
        totals.expense.fmt(),
        totals.net.fmt(),
    ]];
    println!("{}", pretty_table(&["Income", "Expense", "Net"], rows));

    println!("{}", budget_alert(&totals, &st.budget_status));
    println!("{}", budget_banner(&st.budget_status, &totals.expense));

    let surface = TermSurface;
    let mut slots = ChartSlots::new();

    if !snap.trend.is_empty() {
        let spec = ChartSpec {
            kind: ChartKind::Line,
            title: "Income vs expense".to_string(),
            labels: snap.trend.iter().map(|p| p.period.clone()).collect(),
            series: vec![
                Series {
                    name: "Income".to_string(),
                    values: snap.trend.iter().map(|p| p.income).collect(),
                },
                Series {
                    name: "Expense".to_string(),
                    values: snap.trend.iter().map(|p| p.expense).collect(),
                },
            ],
        };
        if let Err(e) = slots.show(&surface, ChartSlot::Trend, &spec) {
            warn!(error = %e, "trend chart failed");
        }
    }

    if !snap.by_category.is_empty() {
        let spec = ChartSpec {
            kind: ChartKind::Pie,
            title: "Expense by category".to_string(),
            labels: snap.by_category.iter().map(|c| c.name.clone()).collect(),
            series: vec![Series {
                name: "Expense".to_string(),
                values: snap.by_category.iter().map(|c| c.amount).collect(),
            }],
        };
        if let Err(e) = slots.show(&surface, ChartSlot::Category, &spec) {
            warn!(error = %e, "category chart failed");
        }
    }

    if !snap.arap.is_empty() {
        let rows: Vec<Vec<String>> = snap
            .arap
            .iter()
            .map(|e| {
                vec![
                    e.user_name
                        .clone()
                        .unwrap_or_else(|| format!("User {}", e.user_id)),
                    e.ar.fmt(),
                    e.ap.fmt(),
                    format!("{:.2}", crate::analytics::arap_net(e)),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Member", "Receivable", "Payable", "Net"], rows)
        );
    }

    if !snap.merchants.is_empty() {
        let rows: Vec<Vec<String>> = snap
            .merchants
            .iter()
            .map(|m| vec![m.label.clone(), m.amount.fmt()])
            .collect();
        println!("{}", pretty_table(&["Merchant", "Amount"], rows));
    }

    for rec in &snap.recommendations {
        if rec.code.is_empty() {
            println!("{}", rec.message);
        } else {
            println!("{}: {}", rec.code, rec.message);
        }
    }
}
