// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::app::App;
use crate::demo::{sample_entries, sample_text};
use crate::models::now_local;

pub fn handle(app: &mut App<'_>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("seed", sub)) => {
            let days = *sub.get_one::<u32>("days").unwrap_or(&90);
            let entries = sample_entries(now_local().date(), days);
            let n = entries.len();
            app.store.add_many(entries)?;
            println!("Seeded {} entries over {} days", n, days);
        }
        Some(("text", _)) => {
            let seed = app.store.entries().len();
            println!("{}", sample_text(seed));
        }
        _ => {}
    }
    Ok(())
}
