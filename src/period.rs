// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Calendar periods (week, month, year) relative to a reference instant.

use anyhow::{Result, anyhow};
use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Period {
    /// Monday-based calendar week, offset in weeks from the current one.
    Week(i32),
    Month(i32),
    Year(i32),
}

/// Closed interval; `end` is the last second before the next period starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn contains(&self, t: NaiveDateTime) -> bool {
        t >= self.start && t <= self.end
    }
}

impl Period {
    pub fn parse(unit: &str, offset: i32) -> Result<Period> {
        match unit.trim().to_lowercase().as_str() {
            "week" | "w" => Ok(Period::Week(offset)),
            "month" | "m" => Ok(Period::Month(offset)),
            "year" | "y" => Ok(Period::Year(offset)),
            other => Err(anyhow!("Invalid period '{}', expected week|month|year", other)),
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Period::Week(_) => "week",
            Period::Month(_) => "month",
            Period::Year(_) => "year",
        }
    }

    /// Resolve against `reference`. Calendar overflow yields `[reference, reference]`.
    pub fn resolve(&self, reference: NaiveDateTime) -> DateRange {
        let bounds = match *self {
            Period::Week(offset) => week_bounds(reference.date(), offset),
            Period::Month(offset) => month_bounds(reference.date(), offset),
            Period::Year(offset) => year_bounds(reference.date(), offset),
        };
        match bounds.and_then(|(start, next)| closed(start, next)) {
            Some(range) => range,
            None => {
                tracing::warn!(
                    period = ?self,
                    %reference,
                    "calendar arithmetic failed; using degenerate range"
                );
                DateRange {
                    start: reference,
                    end: reference,
                }
            }
        }
    }
}

fn closed(start: NaiveDate, next: NaiveDate) -> Option<DateRange> {
    let start = start.and_hms_opt(0, 0, 0)?;
    let end = next.and_hms_opt(0, 0, 0)?.checked_sub_signed(Duration::seconds(1))?;
    Some(DateRange { start, end })
}

fn week_bounds(day: NaiveDate, offset: i32) -> Option<(NaiveDate, NaiveDate)> {
    let shifted = day.checked_add_signed(Duration::try_weeks(i64::from(offset))?)?;
    let back = i64::from(shifted.weekday().num_days_from_monday());
    let monday = shifted.checked_sub_signed(Duration::try_days(back)?)?;
    let next = monday.checked_add_signed(Duration::try_days(7)?)?;
    Some((monday, next))
}

fn month_bounds(day: NaiveDate, offset: i32) -> Option<(NaiveDate, NaiveDate)> {
    let first = day.with_day(1)?;
    let months = Months::new(offset.unsigned_abs());
    let start = if offset >= 0 {
        first.checked_add_months(months)?
    } else {
        first.checked_sub_months(months)?
    };
    let next = start.checked_add_months(Months::new(1))?;
    Some((start, next))
}

fn year_bounds(day: NaiveDate, offset: i32) -> Option<(NaiveDate, NaiveDate)> {
    let year = day.year().checked_add(offset)?;
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let next = NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?;
    Some((start, next))
}
