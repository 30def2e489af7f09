// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use uuid::Uuid;

use crate::app::{App, ParseBackend};
use crate::models::{Category, LedgerEntry, SummaryKind};
use crate::utils::{
    format_timestamp, maybe_print_json, parse_decimal, parse_timestamp, pretty_table,
};

pub fn handle(app: &mut App<'_>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(app, sub)?,
        Some(("list", sub)) => list(app, sub)?,
        Some(("edit", sub)) => edit(app, sub)?,
        Some(("rm", sub)) => rm(app, sub)?,
        Some(("parse", sub)) => parse(app, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(app: &mut App<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let category: Category = sub.get_one::<String>("category").unwrap().parse()?;
    let desc = sub.get_one::<String>("desc").unwrap().trim();
    let entry = match sub.get_one::<String>("at") {
        Some(at) => LedgerEntry::at(parse_timestamp(at)?, category, amount, desc),
        None => LedgerEntry::new(category, amount, desc),
    };
    let id = entry.id;
    app.store.add(entry)?;
    println!("Recorded {} {} '{}' ({})", category, amount, desc, id);
    Ok(())
}

fn parse_id(sub: &clap::ArgMatches) -> Result<Uuid> {
    let raw = sub.get_one::<String>("id").unwrap().trim();
    Uuid::parse_str(raw).with_context(|| format!("Invalid entry id '{}'", raw))
}

fn edit(app: &mut App<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub)?;
    let mut entry = app
        .store
        .get(id)
        .cloned()
        .with_context(|| format!("Entry '{}' not found", id))?;
    if let Some(a) = sub.get_one::<String>("amount") {
        entry.amount = parse_decimal(a)?;
    }
    if let Some(c) = sub.get_one::<String>("category") {
        entry.category = c.parse()?;
    }
    if let Some(d) = sub.get_one::<String>("desc") {
        entry.description = d.trim().to_string();
    }
    if let Some(t) = sub.get_one::<String>("at") {
        entry.timestamp = parse_timestamp(t)?;
    }
    app.store.update(entry)?;
    println!("Updated entry {}", id);
    Ok(())
}

fn rm(app: &mut App<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub)?;
    let removed = app.store.remove(id)?;
    println!("Removed '{}' ({})", removed.description, id);
    Ok(())
}

fn parse(app: &mut App<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let text = sub.get_one::<String>("text").unwrap().trim();
    if text.is_empty() {
        bail!("Nothing to parse: --text is empty");
    }
    let backend = match sub.get_one::<String>("via").map(String::as_str) {
        Some("workflow") => ParseBackend::Workflow,
        _ => ParseBackend::Model,
    };
    let created = app.parse_text(text, backend)?;
    let rows: Vec<Vec<String>> = created.iter().map(|e| row(e).into_cells()).collect();
    println!("{}", pretty_table(&HEADERS, rows));
    Ok(())
}

fn list(app: &App<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(app.store.entries(), sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data.into_iter().map(EntryRow::into_cells).collect();
        println!("{}", pretty_table(&HEADERS, rows));
    }
    Ok(())
}

const HEADERS: [&str; 5] = ["Time", "Category", "Amount", "Description", "Id"];

#[derive(Serialize)]
pub struct EntryRow {
    pub timestamp: String,
    pub category: String,
    pub amount: String,
    pub description: String,
    pub id: String,
}

impl EntryRow {
    fn into_cells(self) -> Vec<String> {
        vec![self.timestamp, self.category, self.amount, self.description, self.id]
    }
}

fn row(e: &LedgerEntry) -> EntryRow {
    EntryRow {
        timestamp: format_timestamp(&e.timestamp),
        category: e.category.name().to_string(),
        amount: format!("{:.2}", e.amount),
        description: e.description.clone(),
        id: e.id.to_string(),
    }
}

/// Entries matching the `list` filters, newest first.
pub fn query_rows(entries: &[LedgerEntry], sub: &clap::ArgMatches) -> Result<Vec<EntryRow>> {
    let kind = sub
        .get_one::<String>("kind")
        .map(|k| k.parse::<SummaryKind>())
        .transpose()?;
    let category = sub
        .get_one::<String>("category")
        .map(|c| c.parse::<Category>())
        .transpose()?;
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);
    Ok(entries
        .iter()
        .filter(|e| kind.is_none_or(|k| k.matches(e.amount)))
        .filter(|e| category.is_none_or(|c| c == e.category))
        .take(limit)
        .map(row)
        .collect())
}
