// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use ledgerclip::normalize::{self, Scalar};
use serde_json::json;

#[test]
fn fmt_missing_is_dash() {
    assert_eq!(normalize::fmt(None), "-");
    assert_eq!(normalize::fmt(Some(&json!(null))), "-");
}

#[test]
fn fmt_number_gets_two_decimals() {
    assert_eq!(normalize::fmt(Some(&json!(1.5))), "1.50");
    assert_eq!(normalize::fmt(Some(&json!(10))), "10.00");
    assert_eq!(normalize::fmt(Some(&json!("-6"))), "-6.00");
}

#[test]
fn fmt_malformed_keeps_raw_text() {
    assert_eq!(normalize::fmt(Some(&json!("12,99"))), "12,99");
    assert_eq!(normalize::fmt(Some(&json!("n/a"))), "n/a");
}

#[test]
fn empty_string_counts_as_zero() {
    assert_eq!(normalize::fmt(Some(&json!(""))), "0.00");
    assert_eq!(normalize::fmt(Some(&json!("   "))), "0.00");
}

#[test]
fn snake_and_camel_read_the_same() {
    let snake = json!({ "amount_total": "1.5" });
    let camel = json!({ "amountTotal": 1.5 });
    let a = normalize::scalar(&snake, "amount_total", "amountTotal");
    let b = normalize::scalar(&camel, "amount_total", "amountTotal");
    assert_eq!(a.fmt(), "1.50");
    assert_eq!(b.fmt(), "1.50");
}

#[test]
fn null_snake_key_falls_through_to_camel() {
    let v = json!({ "amount_total": null, "amountTotal": "2" });
    assert_eq!(normalize::scalar(&v, "amount_total", "amountTotal").fmt(), "2.00");
}

#[test]
fn to_decimal_treats_text_as_zero() {
    assert_eq!(
        Scalar::from_value(Some(&json!("garbage"))).to_decimal(),
        rust_decimal::Decimal::ZERO
    );
    assert_eq!(
        Scalar::from_value(Some(&json!("3.25"))).to_decimal().to_string(),
        "3.25"
    );
}

#[test]
fn datetime_string_passes_through() {
    let v = json!("2025-08-01T12:30:00");
    assert_eq!(
        normalize::canon_datetime(Some(&v)).unwrap(),
        "2025-08-01T12:30:00"
    );
}

#[test]
fn datetime_components_join_with_zero_padding() {
    let v = json!([2025, 8, 1, 9, 5]);
    assert_eq!(
        normalize::canon_datetime(Some(&v)).unwrap(),
        "2025-08-01T09:05:00"
    );
    let date_only = json!([2025, 12, 31]);
    assert_eq!(
        normalize::canon_datetime(Some(&date_only)).unwrap(),
        "2025-12-31T00:00:00"
    );
}

#[test]
fn datetime_other_shapes_stringify() {
    assert_eq!(normalize::canon_datetime(Some(&json!(1722470400))).unwrap(), "1722470400");
    assert!(normalize::canon_datetime(Some(&json!(null))).is_none());
    assert!(normalize::canon_datetime(None).is_none());
}

#[test]
fn date_part_reads_the_day() {
    let d = normalize::date_part("2025-08-01T09:05:00").unwrap();
    assert_eq!(d.to_string(), "2025-08-01");
    assert!(normalize::date_part("soon").is_none());
}

#[test]
fn array_reader_defaults_to_empty() {
    let v = json!({ "trend": [1, 2] });
    assert_eq!(normalize::array(&v, "trend", "trend").len(), 2);
    assert!(normalize::array(&v, "arap", "arAp").is_empty());
}
