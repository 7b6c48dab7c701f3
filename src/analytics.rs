// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derivations over the analytics snapshot and budget status: totals,
//! the alert line, and the budget banner.

use rust_decimal::Decimal;

use crate::models::{AnalyticsSnapshot, ArapEntry, BudgetStatusItem};
use crate::normalize::Scalar;

#[derive(Debug, Clone)]
pub struct Totals {
    pub income: Scalar,
    pub expense: Scalar,
    pub net: Scalar,
}

/// Totals come from the snapshot when present, otherwise from summing the
/// trend series. Net falls back to income minus expense.
pub fn derive_totals(snap: &AnalyticsSnapshot) -> Totals {
    let trend_income: Decimal = snap.trend.iter().map(|p| p.income).sum();
    let trend_expense: Decimal = snap.trend.iter().map(|p| p.expense).sum();

    let income = if snap.total_income.is_missing() {
        Scalar::Num(trend_income)
    } else {
        snap.total_income.clone()
    };
    let expense = if snap.total_expense.is_missing() {
        Scalar::Num(trend_expense)
    } else {
        snap.total_expense.clone()
    };
    let net = if snap.net.is_missing() {
        Scalar::Num(income.to_decimal() - expense.to_decimal())
    } else {
        snap.net.clone()
    };

    Totals {
        income,
        expense,
        net,
    }
}

fn names_for(items: &[BudgetStatusItem], status: &str) -> Vec<String> {
    items
        .iter()
        .filter(|b| b.status == status)
        .map(|b| {
            b.category_name
                .clone()
                .unwrap_or_else(|| "Unnamed".to_string())
        })
        .collect()
}

/// One alert line per refresh. Exceeded budgets win over near-limit ones,
/// which win over the plain overspend check.
pub fn budget_alert(totals: &Totals, items: &[BudgetStatusItem]) -> String {
    let exceeded = names_for(items, "EXCEEDED");
    if !exceeded.is_empty() {
        return format!(
            "BUDGET_EXCEEDED: Categories over budget: {}.",
            exceeded.join(", ")
        );
    }
    let near = names_for(items, "NEAR_LIMIT");
    if !near.is_empty() {
        return format!(
            "BUDGET_NEAR_LIMIT: Categories near limit: {}.",
            near.join(", ")
        );
    }
    let income = totals.income.to_decimal();
    let expense = totals.expense.to_decimal();
    if expense > income && expense > Decimal::ZERO {
        return format!(
            "SPEND_TOO_HIGH: Expenses ({:.2}) are greater than income ({:.2}).",
            expense, income
        );
    }
    "No alerts. Your expenses do not exceed income in this period.".to_string()
}

fn used_amount(item: &BudgetStatusItem, total_expense: &Scalar) -> Decimal {
    match &item.spent_amount {
        Scalar::Num(d) => *d,
        _ => total_expense.to_decimal(),
    }
}

/// The banner under the charts. A single ledger-wide budget gets the
/// expense-over-budget form; otherwise the first three category rows are
/// summarized with a "+N more" tail.
pub fn budget_banner(items: &[BudgetStatusItem], total_expense: &Scalar) -> String {
    if items.is_empty() {
        let expense = total_expense.to_decimal();
        if expense > Decimal::ZERO {
            return format!("{:.2} total expense (no budgets set)", expense);
        }
        return "No expense yet".to_string();
    }

    if let [only] = items {
        if only.category_id.is_none() && only.limit_amount > Decimal::ZERO {
            let used = used_amount(only, total_expense);
            let ratio = only.ratio.unwrap_or_else(|| used / only.limit_amount);
            return format!(
                "{:.2} / {:.2} ({:.1}% used [Expense/Budget])",
                used,
                only.limit_amount,
                ratio * Decimal::ONE_HUNDRED
            );
        }
    }

    let shown: Vec<String> = items
        .iter()
        .take(3)
        .map(|b| {
            let used = used_amount(b, total_expense);
            let pct = b
                .ratio
                .unwrap_or_else(|| {
                    if b.limit_amount.is_zero() {
                        Decimal::ZERO
                    } else {
                        used / b.limit_amount
                    }
                })
                * Decimal::ONE_HUNDRED;
            format!(
                "{}: {:.2}/{:.2} ({:.1}% used, {})",
                b.category_name.as_deref().unwrap_or("Ledger"),
                used,
                b.limit_amount,
                pct,
                b.status
            )
        })
        .collect();
    let mut banner = shown.join(" | ");
    if items.len() > 3 {
        banner.push_str(&format!(" (+{} more)", items.len() - 3));
    }
    banner
}

/// Receivable minus payable, counting a malformed side as zero.
pub fn arap_net(entry: &ArapEntry) -> Decimal {
    entry.ar.to_decimal() - entry.ap.to_decimal()
}
