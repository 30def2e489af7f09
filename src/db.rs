// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

use crate::error::{TallyError, TallyResult};
use crate::models::{AnalysisReport, Category, LedgerEntry};
use crate::utils::{format_timestamp, parse_timestamp};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Tally", "tally"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("tally.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    tracing::debug!(path = %path.display(), "database ready");
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS entries(
        id TEXT PRIMARY KEY,
        timestamp TEXT NOT NULL,
        category TEXT NOT NULL,
        amount TEXT NOT NULL,
        description TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_entries_timestamp ON entries(timestamp);

    CREATE TABLE IF NOT EXISTS reports(
        id TEXT PRIMARY KEY,
        timestamp TEXT NOT NULL,
        content TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_reports_timestamp ON reports(timestamp);
    "#,
    )?;
    Ok(())
}

pub fn get_setting(conn: &Connection, key: &str) -> TallyResult<Option<String>> {
    let v = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> TallyResult<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn insert_entry(conn: &Connection, e: &LedgerEntry) -> TallyResult<()> {
    conn.execute(
        "INSERT INTO entries(id, timestamp, category, amount, description)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            e.id.to_string(),
            format_timestamp(&e.timestamp),
            e.category.name(),
            e.amount.to_string(),
            e.description
        ],
    )?;
    Ok(())
}

/// Insert all entries atomically; either every row lands or none does.
pub fn insert_entries(conn: &Connection, entries: &[LedgerEntry]) -> TallyResult<()> {
    let tx = conn.unchecked_transaction()?;
    for e in entries {
        insert_entry(&tx, e)?;
    }
    tx.commit()?;
    Ok(())
}

pub fn update_entry(conn: &Connection, e: &LedgerEntry) -> TallyResult<()> {
    let n = conn.execute(
        "UPDATE entries SET timestamp=?2, category=?3, amount=?4, description=?5 WHERE id=?1",
        params![
            e.id.to_string(),
            format_timestamp(&e.timestamp),
            e.category.name(),
            e.amount.to_string(),
            e.description
        ],
    )?;
    if n == 0 {
        return Err(TallyError::NotFound(format!("entry {}", e.id)));
    }
    Ok(())
}

pub fn delete_entry(conn: &Connection, id: Uuid) -> TallyResult<()> {
    let n = conn.execute("DELETE FROM entries WHERE id=?1", params![id.to_string()])?;
    if n == 0 {
        return Err(TallyError::NotFound(format!("entry {}", id)));
    }
    Ok(())
}

/// All entries, newest first. Ties keep insertion order.
pub fn load_entries(conn: &Connection) -> TallyResult<Vec<LedgerEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, timestamp, category, amount, description FROM entries
         ORDER BY timestamp DESC, rowid ASC",
    )?;
    let mut cur = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = cur.next()? {
        out.push(entry_from_row(r)?);
    }
    Ok(out)
}

fn entry_from_row(r: &Row<'_>) -> TallyResult<LedgerEntry> {
    let id: String = r.get(0)?;
    let ts: String = r.get(1)?;
    let category: String = r.get(2)?;
    let amount: String = r.get(3)?;
    let description: String = r.get(4)?;
    Ok(LedgerEntry {
        id: parse_uuid(&id)?,
        timestamp: parse_timestamp(&ts)
            .map_err(|e| TallyError::Decode(format!("entry {}: {}", id, e)))?,
        category: Category::from_name_or_other(&category),
        amount: amount
            .parse()
            .map_err(|_| TallyError::Decode(format!("entry {}: invalid amount '{}'", id, amount)))?,
        description,
    })
}

pub fn insert_report(conn: &Connection, report: &AnalysisReport) -> TallyResult<()> {
    conn.execute(
        "INSERT INTO reports(id, timestamp, content) VALUES (?1, ?2, ?3)",
        params![
            report.id.to_string(),
            format_timestamp(&report.timestamp),
            report.content
        ],
    )?;
    Ok(())
}

pub fn latest_report(conn: &Connection) -> TallyResult<Option<AnalysisReport>> {
    let row: Option<(String, String, String)> = conn
        .query_row(
            "SELECT id, timestamp, content FROM reports
             ORDER BY timestamp DESC, rowid DESC LIMIT 1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .optional()?;
    match row {
        Some((id, ts, content)) => Ok(Some(AnalysisReport {
            id: parse_uuid(&id)?,
            timestamp: parse_timestamp(&ts)
                .map_err(|e| TallyError::Decode(format!("report {}: {}", id, e)))?,
            content,
        })),
        None => Ok(None),
    }
}

fn parse_uuid(s: &str) -> TallyResult<Uuid> {
    Uuid::parse_str(s).map_err(|e| TallyError::Decode(format!("invalid id '{}': {}", s, e)))
}
