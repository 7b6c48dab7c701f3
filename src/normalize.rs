// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Tolerant readers for the service's JSON payloads.
//!
//! The API emits both snake_case and camelCase field names depending on the
//! endpoint, numbers arrive as JSON numbers or as strings, and timestamps
//! come back in three different encodings. Everything in this module reads
//! "whatever the server sent" into one canonical form without panicking on
//! shape drift.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;

/// A display-oriented numeric field as read off the wire.
///
/// Absent fields and malformed fields are different situations: an absent
/// field renders as a placeholder, a malformed one keeps its raw text so the
/// user sees what the server actually said.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Missing,
    Num(Decimal),
    Text(String),
}

impl Default for Scalar {
    fn default() -> Scalar {
        Scalar::Missing
    }
}

impl Scalar {
    pub fn from_value(v: Option<&Value>) -> Scalar {
        match v {
            None | Some(Value::Null) => Scalar::Missing,
            Some(Value::Number(n)) => match n.to_string().parse::<Decimal>() {
                Ok(d) => Scalar::Num(d),
                Err(_) => Scalar::Text(n.to_string()),
            },
            Some(Value::String(s)) => {
                let t = s.trim();
                if t.is_empty() {
                    // An empty string is a zero amount, not garbage.
                    Scalar::Num(Decimal::ZERO)
                } else {
                    match t.parse::<Decimal>() {
                        Ok(d) => Scalar::Num(d),
                        Err(_) => Scalar::Text(s.clone()),
                    }
                }
            }
            Some(other) => Scalar::Text(other.to_string()),
        }
    }

    /// Two-decimal rendering for numbers, raw text for malformed values,
    /// "-" for absent ones.
    pub fn fmt(&self) -> String {
        match self {
            Scalar::Missing => "-".to_string(),
            Scalar::Num(d) => format!("{:.2}", d),
            Scalar::Text(s) => s.clone(),
        }
    }

    /// Numeric interpretation for arithmetic; anything non-numeric counts
    /// as zero.
    pub fn to_decimal(&self) -> Decimal {
        match self {
            Scalar::Num(d) => *d,
            _ => Decimal::ZERO,
        }
    }

    /// Unformatted rendering: the number as parsed, or the raw text.
    pub fn raw(&self) -> String {
        match self {
            Scalar::Missing => "-".to_string(),
            Scalar::Num(d) => d.to_string(),
            Scalar::Text(s) => s.clone(),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Scalar::Missing)
    }
}

/// Format a raw JSON value the same way `Scalar::fmt` would.
pub fn fmt(v: Option<&Value>) -> String {
    Scalar::from_value(v).fmt()
}

/// Look up `snake` then `camel` on an object, skipping explicit nulls.
pub fn pick<'a>(obj: &'a Value, snake: &str, camel: &str) -> Option<&'a Value> {
    for key in [snake, camel] {
        if let Some(v) = obj.get(key) {
            if !v.is_null() {
                return Some(v);
            }
        }
    }
    None
}

pub fn string(obj: &Value, snake: &str, camel: &str) -> Option<String> {
    match pick(obj, snake, camel) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
        None => None,
    }
}

pub fn int(obj: &Value, snake: &str, camel: &str) -> Option<i64> {
    match pick(obj, snake, camel) {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Decimal read that treats absence and garbage alike as zero. Use
/// [`scalar`] instead when the distinction must survive to the display layer.
pub fn decimal(obj: &Value, snake: &str, camel: &str) -> Decimal {
    Scalar::from_value(pick(obj, snake, camel)).to_decimal()
}

pub fn scalar(obj: &Value, snake: &str, camel: &str) -> Scalar {
    Scalar::from_value(pick(obj, snake, camel))
}

const EMPTY: &[Value] = &[];

pub fn array<'a>(obj: &'a Value, snake: &str, camel: &str) -> &'a [Value] {
    match pick(obj, snake, camel) {
        Some(Value::Array(items)) => items,
        _ => EMPTY,
    }
}

/// Canonicalize a timestamp field into an ISO-like string.
///
/// Three encodings show up in the wild: a plain string (passed through
/// unchanged), an array of date components `[y, m, d, h?, mi?, s?]` (joined
/// with zero padding, missing time components defaulting to zero), and
/// anything else (stringified as-is).
pub fn canon_datetime(v: Option<&Value>) -> Option<String> {
    match v {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Array(parts)) => {
            let n = |i: usize| -> i64 {
                parts
                    .get(i)
                    .and_then(Value::as_i64)
                    .unwrap_or_default()
            };
            if parts.len() < 3 {
                return Some(Value::Array(parts.clone()).to_string());
            }
            Some(format!(
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
                n(0),
                n(1),
                n(2),
                n(3),
                n(4),
                n(5)
            ))
        }
        Some(other) => Some(other.to_string()),
    }
}

/// First ten characters of a canonical timestamp, parsed as a date when they
/// form one.
pub fn date_part(ts: &str) -> Option<NaiveDate> {
    let head = ts.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}
