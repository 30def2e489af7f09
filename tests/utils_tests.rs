// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use tally::models::Category;
use tally::utils::{fmt_amount, mask_secret, parse_timestamp, strip_code_fence};

#[test]
fn amounts_truncate_toward_zero() {
    assert_eq!(fmt_amount("-3.456".parse().unwrap()), "-3.45");
    assert_eq!(fmt_amount("2.999".parse().unwrap()), "2.99");
    assert_eq!(fmt_amount(Decimal::new(8888, 0)), "8888.00");
}

#[test]
fn code_fences_are_stripped() {
    assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
    assert_eq!(strip_code_fence("  {\"a\":1}  "), "{\"a\":1}");
}

#[test]
fn secrets_are_masked() {
    assert_eq!(mask_secret("sk-abcdef1234"), "*********1234");
    assert_eq!(mask_secret("abc"), "***");
    assert_eq!(mask_secret(""), "");
}

#[test]
fn timestamps_in_several_shapes() {
    let full = parse_timestamp("2025-01-10 20:00:00").unwrap();
    assert_eq!(parse_timestamp("2025-01-10T20:00:00").unwrap(), full);
    assert_eq!(parse_timestamp("2025-01-10 20:00").unwrap(), full);
    assert_eq!(
        parse_timestamp("2025-01-10").unwrap().to_string(),
        "2025-01-10 00:00:00"
    );
    assert!(parse_timestamp("10/01/2025").is_err());
}

#[test]
fn categories_parse_case_insensitively() {
    assert_eq!("rent".parse::<Category>().unwrap(), Category::Rent);
    assert!("Pets".parse::<Category>().is_err());
    assert_eq!(Category::from_name_or_other("Pets"), Category::Other);
    let idx: Vec<usize> = Category::ALL.iter().map(|c| c.index()).collect();
    assert_eq!(idx, (0..7).collect::<Vec<_>>());
}

#[test]
fn labels_are_canonical_names() {
    for c in Category::ALL {
        assert_eq!(c.label(), c.name());
    }
    assert_eq!(Category::Food.label(), "Food");
    assert_eq!(Category::Transportation.label(), "Transportation");
}
