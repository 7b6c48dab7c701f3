// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Builds the split allocation payload for a new transaction.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

pub const METHOD_EQUAL: &str = "EQUAL";
pub const METHOD_EXACT: &str = "EXACT";
pub const METHOD_PERCENT: &str = "PERCENT";
pub const METHOD_WEIGHT: &str = "WEIGHT";

/// One participant row as the service expects it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SplitItem {
    pub user_id: i64,
    pub split_method: &'static str,
    pub share_value: Decimal,
    pub included: bool,
}

/// A participant as entered by the user: member id plus the raw share text.
#[derive(Debug, Clone)]
pub struct SplitRow {
    pub user_id: i64,
    pub value: String,
}

fn parse_share(raw: &str) -> Option<Decimal> {
    let t = raw.trim();
    if t.is_empty() {
        return None;
    }
    match t.parse::<Decimal>() {
        Ok(d) if !d.is_zero() => Some(d),
        _ => None,
    }
}

/// Turn the entered rows into the wire payload for `method`.
///
/// EQUAL includes every row with a zero share value; the server divides.
/// The value-bearing methods drop rows whose share is zero, empty, or
/// unparsable, and round the rest to two decimal places half away from
/// zero. When no row survives, the payload is empty and the server falls
/// back to its own default split.
pub fn build_splits(method: &str, rows: &[SplitRow]) -> Vec<SplitItem> {
    let method = match method {
        METHOD_EXACT => METHOD_EXACT,
        METHOD_PERCENT => METHOD_PERCENT,
        METHOD_WEIGHT => METHOD_WEIGHT,
        _ => METHOD_EQUAL,
    };

    if method == METHOD_EQUAL {
        return rows
            .iter()
            .map(|r| SplitItem {
                user_id: r.user_id,
                split_method: METHOD_EQUAL,
                share_value: Decimal::ZERO,
                included: true,
            })
            .collect();
    }

    rows.iter()
        .filter_map(|r| {
            let share = parse_share(&r.value)?;
            Some(SplitItem {
                user_id: r.user_id,
                split_method: method,
                share_value: share
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
                included: true,
            })
        })
        .collect()
}
