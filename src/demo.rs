// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Deterministic sample ledger for trying the tool without real data.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use rust_decimal::Decimal;

use crate::models::{Category, LedgerEntry};

pub const SAMPLE_TEXTS: [&str; 3] = [
    "Lovely weather today. Took a shared bike to work for 2.5, grabbed two pork buns for 6 on \
     the way. After nine hours at the office I took the 2 ferry across the river and spent 200 \
     on a tower ticket to see the skyline at night.",
    "Weekend breakfast was 5, then I walked to the park and found a 100 note on the way! \
     Celebrated with bubble tea and a movie, 188 in total.",
    "Salary of 3800 arrived. Five minutes of joy later I paid 5800 toward the mortgage.",
];

const BREAKFAST: [&str; 7] = [
    "Breakfast",
    "Egg muffin",
    "Soy milk and fritters",
    "Steamed buns",
    "Egg pancake",
    "Corn",
    "Rice ball",
];
const LUNCH: [&str; 6] = [
    "Lunch",
    "Stir fry",
    "Hot pot",
    "Dumplings",
    "Noodles",
    "Burger",
];
const DINNER: [&str; 7] = [
    "Dinner",
    "Stir fry",
    "Hot pot",
    "Dumplings",
    "Noodles",
    "Burger",
    "Barbecue",
];

pub fn sample_text(seed: usize) -> &'static str {
    SAMPLE_TEXTS[seed % SAMPLE_TEXTS.len()]
}

/// Amount in `[low, high)` with cents, varying by day and slot; always negative.
fn spend(day: u32, salt: u32, low: i64, high: i64) -> Decimal {
    let span = ((high - low) * 100) as u32;
    let cents = (day.wrapping_mul(7919).wrapping_add(salt.wrapping_mul(104_729))) % span.max(1);
    -(Decimal::new(low * 100 + i64::from(cents), 2))
}

fn at(day: NaiveDate, hour: u32) -> Option<NaiveDateTime> {
    day.and_hms_opt(hour, 0, 0)
}

/// `days` days of meals, weekday commutes, salary on the 10th and rent on the 15th,
/// ending on `today`.
pub fn sample_entries(today: NaiveDate, days: u32) -> Vec<LedgerEntry> {
    let mut out = Vec::new();
    for i in 0..days {
        let Some(day) = today.checked_sub_signed(Duration::days(i64::from(i))) else {
            break;
        };
        let (Some(am8), Some(pm12), Some(pm17), Some(pm20)) =
            (at(day, 8), at(day, 12), at(day, 17), at(day, 20))
        else {
            break;
        };
        let pick = i as usize;
        out.push(LedgerEntry::at(
            am8,
            Category::Food,
            spend(i, 1, 6, 12),
            BREAKFAST[pick % BREAKFAST.len()],
        ));
        out.push(LedgerEntry::at(
            pm12,
            Category::Food,
            spend(i, 2, 15, 50),
            LUNCH[pick % LUNCH.len()],
        ));
        out.push(LedgerEntry::at(
            pm17,
            Category::Food,
            spend(i, 3, 10, 30),
            DINNER[pick % DINNER.len()],
        ));
        if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            let metro = Decimal::new(-5, 0);
            out.push(LedgerEntry::at(am8, Category::Transportation, metro, "Metro"));
            out.push(LedgerEntry::at(pm17, Category::Transportation, metro, "Metro"));
        }
        match day.day() {
            10 => out.push(LedgerEntry::at(
                pm20,
                Category::Salary,
                Decimal::new(8888, 0),
                "Salary",
            )),
            15 => out.push(LedgerEntry::at(
                pm20,
                Category::Rent,
                Decimal::new(-4800, 0),
                "Rent",
            )),
            _ => {}
        }
    }
    out
}
