// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use ledgerclip::splits::{build_splits, SplitRow};
use rust_decimal::Decimal;

fn row(user_id: i64, value: &str) -> SplitRow {
    SplitRow {
        user_id,
        value: value.to_string(),
    }
}

#[test]
fn equal_split_includes_everyone_with_zero_share() {
    let rows = vec![row(1, ""), row(2, ""), row(3, "")];
    let splits = build_splits("EQUAL", &rows);
    assert_eq!(splits.len(), 3);
    for s in &splits {
        assert_eq!(s.split_method, "EQUAL");
        assert_eq!(s.share_value, Decimal::ZERO);
        assert!(s.included);
    }
}

#[test]
fn exact_split_drops_zero_and_unparsable_rows() {
    let rows = vec![row(1, "10.00"), row(2, "0"), row(3, "abc"), row(4, "")];
    let splits = build_splits("EXACT", &rows);
    assert_eq!(splits.len(), 1);
    assert_eq!(splits[0].user_id, 1);
    assert_eq!(format!("{:.2}", splits[0].share_value), "10.00");
}

#[test]
fn shares_round_half_away_from_zero() {
    let rows = vec![row(1, "33.335"), row(2, "33.334")];
    let splits = build_splits("PERCENT", &rows);
    assert_eq!(format!("{:.2}", splits[0].share_value), "33.34");
    assert_eq!(format!("{:.2}", splits[1].share_value), "33.33");
}

#[test]
fn no_surviving_rows_gives_empty_payload() {
    let rows = vec![row(1, "0"), row(2, "junk")];
    assert!(build_splits("WEIGHT", &rows).is_empty());
    assert!(build_splits("EXACT", &[]).is_empty());
}

#[test]
fn unknown_method_falls_back_to_equal() {
    let rows = vec![row(1, "5")];
    let splits = build_splits("MYSTERY", &rows);
    assert_eq!(splits[0].split_method, "EQUAL");
    assert_eq!(splits[0].share_value, Decimal::ZERO);
}

#[test]
fn building_twice_gives_the_same_payload() {
    let rows = vec![row(1, "60"), row(2, "40")];
    assert_eq!(build_splits("PERCENT", &rows), build_splits("PERCENT", &rows));
}

#[test]
fn serialized_row_matches_wire_shape() {
    let splits = build_splits("EXACT", &[row(7, "12.5")]);
    let v = serde_json::to_value(&splits[0]).unwrap();
    assert_eq!(v["user_id"], 7);
    assert_eq!(v["split_method"], "EXACT");
    assert_eq!(v["included"], true);
}
