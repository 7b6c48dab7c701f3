// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Settlement plan requests and rendering.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::models::SettlementPlan;
use crate::utils::pretty_table;

/// Request body for a custom settlement run. Absent options serialize as
/// nulls so the service applies its own defaults per field.
#[derive(Debug, Clone, Serialize)]
pub struct SettlementConfig {
    pub rounding_strategy: String,
    pub max_transfer_amount: Option<Decimal>,
    pub force_min_cost_flow: bool,
    pub min_cost_flow_threshold: Option<Decimal>,
    pub payment_channels: Option<Vec<String>>,
    pub currency_rates: Option<Value>,
}

impl Default for SettlementConfig {
    fn default() -> SettlementConfig {
        SettlementConfig {
            rounding_strategy: "ROUND_HALF_UP".to_string(),
            max_transfer_amount: None,
            force_min_cost_flow: false,
            min_cost_flow_threshold: None,
            payment_channels: None,
            currency_rates: None,
        }
    }
}

/// One renderer for both the default plan and a custom-config plan. The
/// two can come back shaped differently, so everything goes through the
/// tolerant model readers.
pub fn render_plan(plan: &SettlementPlan) -> String {
    if plan.transfers.is_empty() {
        return "Everyone is settled. No debts to clear.".to_string();
    }

    let count = plan
        .transfer_count
        .unwrap_or(plan.transfers.len() as i64);
    let mut out = format!("Currency: {} • Transfers: {}", plan.currency, count);
    out.push('\n');

    let rows: Vec<Vec<String>> = plan
        .transfers
        .iter()
        .map(|t| {
            vec![
                t.from_label(),
                t.to_label(),
                t.amount.fmt(),
            ]
        })
        .collect();
    out.push_str(&pretty_table(&["From", "To", "Amount"], rows).to_string());
    out
}
