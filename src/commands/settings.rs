// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::app::App;
use crate::config::SECRET_KEYS;
use crate::utils::{mask_secret, pretty_table};

pub fn handle(app: &mut App<'_>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let rows: Vec<Vec<String>> = app
                .config
                .iter()
                .map(|(k, v)| {
                    let shown = if SECRET_KEYS.contains(&k) {
                        mask_secret(v)
                    } else {
                        v.to_string()
                    };
                    vec![k.to_string(), shown]
                })
                .collect();
            println!("{}", pretty_table(&["Key", "Value"], rows));
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            let value = sub.get_one::<String>("value").unwrap();
            app.config.set(key, value)?;
            app.save_config()?;
            println!("Set {}", key);
        }
        Some(("unset", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            app.config.unset(key)?;
            app.save_config()?;
            println!("Reset {}", key);
        }
        _ => {}
    }
    Ok(())
}
