// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use ledgerclip::analytics::{arap_net, budget_alert, budget_banner, derive_totals};
use ledgerclip::models::{AnalyticsSnapshot, ArapEntry, BudgetStatusItem};
use ledgerclip::normalize::Scalar;
use serde_json::{json, Value};

fn snapshot(v: Value) -> AnalyticsSnapshot {
    AnalyticsSnapshot::from_value(&v)
}

fn budget_item(v: Value) -> BudgetStatusItem {
    BudgetStatusItem::from_value(&v)
}

#[test]
fn totals_prefer_snapshot_values_over_trend() {
    let snap = snapshot(json!({
        "total_income": "100",
        "total_expense": "40",
        "net_balance": "60",
        "trend": [{ "period": "2025-07", "income": 999, "expense": 999 }]
    }));
    let t = derive_totals(&snap);
    assert_eq!(t.income.fmt(), "100.00");
    assert_eq!(t.expense.fmt(), "40.00");
    assert_eq!(t.net.fmt(), "60.00");
}

#[test]
fn totals_fall_back_to_trend_sums() {
    let snap = snapshot(json!({
        "trend": [
            { "period": "2025-06", "income": 10, "expense": 5 },
            { "period": "2025-07", "income": 20, "expense": 7 }
        ]
    }));
    let t = derive_totals(&snap);
    assert_eq!(t.income.fmt(), "30.00");
    assert_eq!(t.expense.fmt(), "12.00");
    assert_eq!(t.net.fmt(), "18.00");
}

#[test]
fn net_falls_back_to_income_minus_expense() {
    let snap = snapshot(json!({ "total_income": "50", "total_expense": "80" }));
    let t = derive_totals(&snap);
    assert_eq!(t.net.fmt(), "-30.00");
}

#[test]
fn exceeded_budgets_win_over_near_limit() {
    let snap = snapshot(json!({ "total_income": "0", "total_expense": "0" }));
    let t = derive_totals(&snap);
    let items = vec![
        budget_item(json!({ "category_name": "Rent", "limit_amount": "500", "status": "NEAR_LIMIT" })),
        budget_item(json!({ "category_name": "Dining", "limit_amount": "50", "status": "EXCEEDED" })),
        budget_item(json!({ "limit_amount": "10", "status": "EXCEEDED" })),
    ];
    assert_eq!(
        budget_alert(&t, &items),
        "BUDGET_EXCEEDED: Categories over budget: Dining, Unnamed."
    );
}

#[test]
fn near_limit_alert_when_nothing_exceeded() {
    let snap = snapshot(json!({ "total_income": "0", "total_expense": "0" }));
    let t = derive_totals(&snap);
    let items = vec![budget_item(
        json!({ "category_name": "Travel", "limit_amount": "300", "status": "NEAR_LIMIT" }),
    )];
    assert_eq!(
        budget_alert(&t, &items),
        "BUDGET_NEAR_LIMIT: Categories near limit: Travel."
    );
}

#[test]
fn overspend_alert_without_budget_trouble() {
    let snap = snapshot(json!({ "total_income": "100", "total_expense": "500" }));
    let t = derive_totals(&snap);
    assert_eq!(
        budget_alert(&t, &[]),
        "SPEND_TOO_HIGH: Expenses (500.00) are greater than income (100.00)."
    );
}

#[test]
fn quiet_period_has_no_alerts() {
    let snap = snapshot(json!({ "total_income": "100", "total_expense": "80" }));
    let t = derive_totals(&snap);
    assert_eq!(
        budget_alert(&t, &[]),
        "No alerts. Your expenses do not exceed income in this period."
    );
}

#[test]
fn ledger_wide_banner_shows_expense_over_budget() {
    let items = vec![budget_item(
        json!({ "limit_amount": "1000", "spent_amount": "920", "status": "NEAR_LIMIT" }),
    )];
    assert_eq!(
        budget_banner(&items, &Scalar::Missing),
        "920.00 / 1000.00 (92.0% used [Expense/Budget])"
    );
}

#[test]
fn ledger_wide_banner_falls_back_to_total_expense() {
    let items = vec![budget_item(json!({ "limit_amount": "200", "status": "OK" }))];
    let total_expense = Scalar::from_value(Some(&json!("50")));
    assert_eq!(
        budget_banner(&items, &total_expense),
        "50.00 / 200.00 (25.0% used [Expense/Budget])"
    );
}

#[test]
fn category_banner_summarizes_first_three() {
    let items = vec![
        budget_item(json!({ "category_id": 1, "category_name": "Rent", "limit_amount": "500", "spent_amount": "400", "ratio": 0.8, "status": "OK" })),
        budget_item(json!({ "category_id": 2, "category_name": "Dining", "limit_amount": "50", "spent_amount": "60", "ratio": 1.2, "status": "EXCEEDED" })),
        budget_item(json!({ "category_id": 3, "category_name": "Travel", "limit_amount": "300", "spent_amount": "30", "ratio": 0.1, "status": "OK" })),
        budget_item(json!({ "category_id": 4, "category_name": "Misc", "limit_amount": "20", "spent_amount": "0", "ratio": 0, "status": "OK" })),
        budget_item(json!({ "category_id": 5, "category_name": "Gifts", "limit_amount": "20", "spent_amount": "0", "ratio": 0, "status": "OK" })),
    ];
    assert_eq!(
        budget_banner(&items, &Scalar::Missing),
        "Rent: 400.00/500.00 (80.0% used, OK) | Dining: 60.00/50.00 (120.0% used, EXCEEDED) | Travel: 30.00/300.00 (10.0% used, OK) (+2 more)"
    );
}

#[test]
fn empty_budget_banner_reports_expense_or_silence() {
    let expense = Scalar::from_value(Some(&json!("75.5")));
    assert_eq!(
        budget_banner(&[], &expense),
        "75.50 total expense (no budgets set)"
    );
    assert_eq!(budget_banner(&[], &Scalar::Missing), "No expense yet");
}

#[test]
fn arap_net_treats_malformed_side_as_zero() {
    let entry = ArapEntry::from_value(&json!({
        "user_id": 1, "user_name": "Ana", "ar": 7, "ap": "oops"
    }));
    assert_eq!(format!("{:.2}", arap_net(&entry)), "7.00");
    assert_eq!(entry.ap.fmt(), "oops");

    let entry = ArapEntry::from_value(&json!({
        "user_id": 2, "user_name": "Ben", "ar": "bad", "ap": 6
    }));
    assert_eq!(format!("{:.2}", arap_net(&entry)), "-6.00");
}

#[test]
fn recommendations_accept_bare_strings() {
    let snap = snapshot(json!({
        "recommendations": ["Trim your dining spend", { "code": "R1", "message": "Set a budget", "severity": "WARNING" }]
    }));
    assert_eq!(snap.recommendations[0].message, "Trim your dining spend");
    assert_eq!(snap.recommendations[1].code, "R1");
    assert_eq!(snap.recommendations[1].severity.as_deref(), Some("WARNING"));
}
