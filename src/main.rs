// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::process::ExitCode;

use anyhow::Result;

use tally::app::App;
use tally::llm::OpenAiClient;
use tally::store::StoreEvent;
use tally::{cli, commands, db, utils};

fn main() -> ExitCode {
    utils::init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(Failure::Reported) => ExitCode::FAILURE,
        Err(Failure::Other(e)) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

enum Failure {
    /// Already shown to the user as an error notice.
    Reported,
    Other(anyhow::Error),
}

impl From<anyhow::Error> for Failure {
    fn from(e: anyhow::Error) -> Self {
        Failure::Other(e)
    }
}

fn run() -> Result<(), Failure> {
    let matches = cli::build_cli().get_matches();

    let conn = db::open_or_init()?;
    let mut app = App::load(&conn, Box::new(OpenAiClient::new())).map_err(anyhow::Error::from)?;
    let notices = app.store.subscribe();

    let outcome = dispatch(&mut app, &matches);

    let mut reported = false;
    for event in notices.try_iter() {
        if let StoreEvent::Notice(n) = event {
            if n.is_error {
                eprintln!("error: {}", n.text);
                reported = true;
            } else {
                eprintln!("{}", n.text);
            }
        }
    }
    match outcome {
        Ok(()) => Ok(()),
        Err(_) if reported => Err(Failure::Reported),
        Err(e) => Err(Failure::Other(e)),
    }
}

fn dispatch(app: &mut App<'_>, matches: &clap::ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("config", sub)) => commands::settings::handle(app, sub)?,
        Some(("entry", sub)) => commands::entries::handle(app, sub)?,
        Some(("summary", sub)) => commands::summary::handle(app, sub)?,
        Some(("report", sub)) => commands::reports::handle(app, sub)?,
        Some(("export", sub)) => commands::exporter::handle(app, sub)?,
        Some(("demo", sub)) => commands::demo::handle(app, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
