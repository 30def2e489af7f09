// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::app::App;
use crate::models::now_local;
use crate::utils::format_timestamp;

pub fn handle(app: &mut App<'_>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("generate", _)) => {
            let report = app.generate_report(now_local())?;
            println!("# Analysis {}\n", format_timestamp(&report.timestamp));
            println!("{}", report.content);
        }
        Some(("show", _)) => match app.latest_report() {
            Some(report) => {
                println!("# Analysis {}\n", format_timestamp(&report.timestamp));
                println!("{}", report.content);
            }
            None => println!("No analysis yet. Run `tally report generate`."),
        },
        _ => {}
    }
    Ok(())
}
