// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde_json::json;

use crate::api::ApiClient;
use crate::commands::SESSION_EXPIRED;
use crate::models::SettlementPlan;
use crate::session::Session;
use crate::settlement::{render_plan, SettlementConfig};
use crate::utils::parse_decimal;

pub fn handle(api: &ApiClient, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("plan", sub)) => plan(api, session, sub)?,
        _ => {}
    }
    Ok(())
}

fn plan(api: &ApiClient, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let ledger_id = session.require_current_ledger()?;
    let path = format!("/api/v1/ledgers/{}/settlement-plan", ledger_id);

    let custom = sub.get_one::<String>("rounding").is_some()
        || sub.get_one::<String>("max-transfer").is_some()
        || sub.get_flag("min-cost-flow")
        || sub.get_one::<String>("threshold").is_some();

    let data = if custom {
        let mut config = SettlementConfig::default();
        if let Some(r) = sub.get_one::<String>("rounding") {
            config.rounding_strategy = r.clone();
        }
        if let Some(cap) = sub.get_one::<String>("max-transfer") {
            config.max_transfer_amount = Some(parse_decimal(cap)?);
        }
        config.force_min_cost_flow = sub.get_flag("min-cost-flow");
        if let Some(t) = sub.get_one::<String>("threshold") {
            config.min_cost_flow_threshold = Some(parse_decimal(t)?);
        }
        api.post(&path, &json!(config))?
    } else {
        api.get(&path)?
    };

    let Some(data) = data else {
        println!("{}", SESSION_EXPIRED);
        return Ok(());
    };
    println!("{}", render_plan(&SettlementPlan::from_value(&data)));
    Ok(())
}
