// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::error::TallyResult;
use crate::models::{Category, CategorySummary, LedgerEntry, SummaryKind, checked_total};
use crate::period::Period;

/// Group the entries of one kind inside `period` by category.
///
/// Only categories with at least one matching entry are returned, ordered by
/// `Category::index`. Entries keep their input order within a group.
pub fn summarize(
    entries: &[LedgerEntry],
    kind: SummaryKind,
    reference: NaiveDateTime,
    period: Period,
) -> Vec<CategorySummary> {
    let range = period.resolve(reference);
    let mut grouped: HashMap<Category, Vec<LedgerEntry>> = HashMap::new();
    for e in entries
        .iter()
        .filter(|e| range.contains(e.timestamp) && kind.matches(e.amount))
    {
        grouped.entry(e.category).or_default().push(e.clone());
    }
    let mut out: Vec<CategorySummary> = grouped
        .into_iter()
        .map(|(category, entries)| CategorySummary { category, entries })
        .collect();
    out.sort_by_key(|s| s.category.index());
    out
}

/// (income, expense) totals inside `period`; expense is negative or zero.
pub fn period_totals(
    entries: &[LedgerEntry],
    reference: NaiveDateTime,
    period: Period,
) -> TallyResult<(Decimal, Decimal)> {
    let range = period.resolve(reference);
    let (income, expense): (Vec<&LedgerEntry>, Vec<&LedgerEntry>) = entries
        .iter()
        .filter(|e| range.contains(e.timestamp))
        .partition(|e| e.is_income());
    Ok((
        checked_total(income.iter().map(|e| e.amount))?,
        checked_total(expense.iter().map(|e| e.amount))?,
    ))
}
