// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt::Write as _;

use chrono::{Datelike, NaiveDateTime};

use crate::config::Config;
use crate::error::{TallyError, TallyResult};
use crate::llm::{ChatRequest, ResponseFormat, TextGenerator};
use crate::models::{AnalysisReport, LedgerEntry, SummaryKind};
use crate::period::Period;
use crate::summary::summarize;
use crate::utils::fmt_amount;

pub const SYSTEM_PROMPT: &str = "You are a bookkeeping assistant. Based on the user's \
spending over the last few months, analyse their consumption and suggest sensible spending \
habits and a savings plan. Format the answer as Markdown.";

/// Per-category totals for every month of the current year up to `now`,
/// newest month first.
pub fn build_prompt(entries: &[LedgerEntry], now: NaiveDateTime) -> TallyResult<String> {
    let mut text = format!("{} ledger\n", now.year());
    let months = now.month() as i32;
    for i in 0..months {
        let period = Period::Month(-i);
        let start = period.resolve(now).start;
        let _ = writeln!(text, "{}:", start.format("%B"));
        for s in summarize(entries, SummaryKind::Expense, now, period) {
            let _ = writeln!(text, "  {}: {}", s.category.label(), fmt_amount(s.total()?));
        }
        for s in summarize(entries, SummaryKind::Income, now, period) {
            let _ = writeln!(text, "  {}: +{}", s.category.label(), fmt_amount(s.total()?));
        }
    }
    Ok(text)
}

/// Fails fast with no network call when there is nothing to analyse, no key,
/// or the monthly totals cannot be summed.
pub fn request_report(
    config: &Config,
    generator: &dyn TextGenerator,
    entries: &[LedgerEntry],
    now: NaiveDateTime,
) -> TallyResult<AnalysisReport> {
    if entries.is_empty() {
        return Err(TallyError::EmptyData);
    }
    config.openai_api_key()?;
    let request = ChatRequest {
        system: SYSTEM_PROMPT.to_string(),
        user: build_prompt(entries, now)?,
        format: ResponseFormat::Text,
    };
    let content = generator.generate(config, &request)?;
    if content.trim().is_empty() {
        return Err(TallyError::Decode("Invalid Data".into()));
    }
    Ok(AnalysisReport::new(content))
}
