// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use serde_json::json;

use crate::app::App;
use crate::models::LedgerEntry;
use crate::utils::format_timestamp;

pub fn handle(app: &App<'_>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("entries", sub)) => {
            let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
            let out = sub.get_one::<String>("out").unwrap();
            export_entries(app.store.entries(), &fmt, out)?;
            println!("Exported entries to {}", out);
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Write `entries` oldest first as csv or json.
pub fn export_entries(entries: &[LedgerEntry], fmt: &str, out: &str) -> Result<()> {
    let ordered = entries.iter().rev();
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["timestamp", "category", "amount", "description", "id"])?;
            for e in ordered {
                wtr.write_record([
                    format_timestamp(&e.timestamp),
                    e.category.name().to_string(),
                    e.amount.to_string(),
                    e.description.clone(),
                    e.id.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = ordered
                .map(|e| {
                    json!({
                        "timestamp": format_timestamp(&e.timestamp),
                        "category": e.category.name(),
                        "amount": e.amount.to_string(),
                        "description": e.description,
                        "id": e.id.to_string()
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    Ok(())
}
