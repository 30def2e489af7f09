// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::app::App;
use crate::error::TallyResult;
use crate::models::{SummaryKind, checked_total, now_local};
use crate::period::Period;
use crate::summary::{period_totals, summarize};
use crate::utils::{fmt_amount, format_timestamp, maybe_print_json, parse_timestamp};

#[derive(Serialize)]
pub struct SummaryRow {
    pub category: String,
    pub label: String,
    pub entries: usize,
    pub total: String,
    pub share: String,
}

pub fn handle(app: &App<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let kind: SummaryKind = sub.get_one::<String>("kind").unwrap().parse()?;
    let offset = *sub.get_one::<i32>("offset").unwrap_or(&0);
    let period = Period::parse(sub.get_one::<String>("period").unwrap(), offset)?;
    let reference = match sub.get_one::<String>("at") {
        Some(s) => parse_timestamp(s)?,
        None => now_local(),
    };

    let entries = app.store.entries();
    let summaries = summarize(entries, kind, reference, period);
    let totals = summaries
        .iter()
        .map(|s| s.total())
        .collect::<TallyResult<Vec<Decimal>>>()?;
    let grand = checked_total(totals.iter().copied())?;
    let mut data: Vec<SummaryRow> = Vec::with_capacity(summaries.len());
    for (s, total) in summaries.iter().zip(&totals) {
        data.push(SummaryRow {
            category: s.category.name().to_string(),
            label: s.category.label().to_string(),
            entries: s.entries.len(),
            total: fmt_amount(*total),
            share: format!("{}%", s.share_of(grand)?),
        });
    }
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }

    let range = period.resolve(reference);
    let (income, expense) = period_totals(entries, reference, period)?;
    println!(
        "{} by category, {} {} to {} (income {}, expense {})",
        kind.label(),
        period.unit(),
        format_timestamp(&range.start),
        format_timestamp(&range.end),
        fmt_amount(income),
        fmt_amount(expense),
    );
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(["Category", "Entries", "Total", "Share"].map(Cell::new));
    for (s, row) in summaries.iter().zip(data) {
        t.add_row(vec![
            Cell::new(row.label).fg(s.category.color()),
            Cell::new(row.entries),
            Cell::new(row.total),
            Cell::new(row.share),
        ]);
    }
    println!("{}", t);
    Ok(())
}
