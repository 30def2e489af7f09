// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::{Local, NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{TallyError, TallyResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Food,
    Entertainment,
    Transportation,
    Salary,
    Repayment,
    Rent,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Entertainment,
        Category::Transportation,
        Category::Salary,
        Category::Repayment,
        Category::Rent,
        Category::Other,
    ];

    /// Canonical name, as stored and as sent to the model.
    pub fn name(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Entertainment => "Entertainment",
            Category::Transportation => "Transportation",
            Category::Salary => "Salary",
            Category::Repayment => "Repayment",
            Category::Rent => "Rent",
            Category::Other => "Other",
        }
    }

    /// Display label; the canonical name.
    pub fn label(self) -> &'static str {
        self.name()
    }

    /// Fixed position used to order summaries.
    pub fn index(self) -> usize {
        match self {
            Category::Food => 0,
            Category::Entertainment => 1,
            Category::Transportation => 2,
            Category::Salary => 3,
            Category::Repayment => 4,
            Category::Rent => 5,
            Category::Other => 6,
        }
    }

    pub fn color(self) -> comfy_table::Color {
        use comfy_table::Color;
        match self {
            Category::Food => Color::Blue,
            Category::Entertainment => Color::Red,
            Category::Transportation => Color::Green,
            Category::Salary => Color::Magenta,
            Category::Repayment => Color::Cyan,
            Category::Rent => Color::Yellow,
            Category::Other => Color::Grey,
        }
    }

    /// Lenient lookup for model replies: anything unrecognised becomes `Other`.
    pub fn from_name_or_other(s: &str) -> Category {
        s.parse().unwrap_or(Category::Other)
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| {
                let names: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();
                anyhow!("Unknown category '{}' (expected one of {})", needle, names.join(", "))
            })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryKind {
    Expense,
    Income,
}

impl SummaryKind {
    pub fn label(self) -> &'static str {
        match self {
            SummaryKind::Expense => "Expense",
            SummaryKind::Income => "Income",
        }
    }

    pub fn matches(self, amount: Decimal) -> bool {
        let is_income = amount >= Decimal::ZERO;
        is_income == (self == SummaryKind::Income)
    }
}

impl FromStr for SummaryKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" | "expenses" => Ok(SummaryKind::Expense),
            "income" => Ok(SummaryKind::Income),
            other => Err(anyhow!("Unknown kind '{}' (use expense|income)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub timestamp: NaiveDateTime,
    pub category: Category,
    pub amount: Decimal,
    pub description: String,
}

impl LedgerEntry {
    /// New entry stamped with the current local time.
    pub fn new(category: Category, amount: Decimal, description: impl Into<String>) -> Self {
        Self::at(now_local(), category, amount, description)
    }

    pub fn at(
        timestamp: NaiveDateTime,
        category: Category,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            category,
            amount,
            description: description.into(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.amount >= Decimal::ZERO
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: Uuid,
    pub timestamp: NaiveDateTime,
    pub content: String,
}

impl AnalysisReport {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: now_local(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category: Category,
    pub entries: Vec<LedgerEntry>,
}

impl CategorySummary {
    pub fn total(&self) -> TallyResult<Decimal> {
        checked_total(self.entries.iter().map(|e| e.amount))
    }

    /// Percentage of `grand_total` this category accounts for.
    pub fn share_of(&self, grand_total: Decimal) -> TallyResult<Decimal> {
        if grand_total.is_zero() {
            return Ok(Decimal::ZERO);
        }
        self.total()?
            .checked_div(grand_total)
            .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
            .map(|p| p.round_dp(1))
            .ok_or_else(|| TallyError::Overflow(format!("share of {}", self.category)))
    }
}

/// Sum amounts, failing instead of panicking when the result leaves `Decimal`'s range.
pub fn checked_total(amounts: impl IntoIterator<Item = Decimal>) -> TallyResult<Decimal> {
    amounts.into_iter().try_fold(Decimal::ZERO, |acc, a| {
        acc.checked_add(a).ok_or_else(|| TallyError::Overflow(format!("{} + {}", acc, a)))
    })
}

/// Local wall-clock time truncated to whole seconds.
pub fn now_local() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}
