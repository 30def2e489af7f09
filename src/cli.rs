// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn entry_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(
        Arg::new("amount")
            .long("amount")
            .required(required)
            .allow_hyphen_values(true)
            .help("Signed amount; negative for spending"),
    )
    .arg(
        Arg::new("category")
            .long("category")
            .required(required)
            .help("Food|Entertainment|Transportation|Salary|Repayment|Rent|Other"),
    )
    .arg(
        Arg::new("desc")
            .long("desc")
            .required(required)
            .help("Free-text description"),
    )
    .arg(
        Arg::new("at")
            .long("at")
            .help("Timestamp YYYY-MM-DD[ HH:MM[:SS]] (default: now)"),
    )
}

pub fn build_cli() -> Command {
    Command::new("tally")
        .version(clap::crate_version!())
        .about("AI-assisted personal ledger")
        .subcommand(Command::new("init").about("Create the local database"))
        .subcommand(
            Command::new("config")
                .about("Show or change API settings")
                .subcommand(Command::new("show").about("Show settings (secrets masked)"))
                .subcommand(
                    Command::new("set")
                        .about("Set a setting")
                        .arg(Arg::new("key").long("key").required(true))
                        .arg(Arg::new("value").long("value").required(true)),
                )
                .subcommand(
                    Command::new("unset")
                        .about("Reset a setting to its default")
                        .arg(Arg::new("key").long("key").required(true)),
                ),
        )
        .subcommand(
            Command::new("entry")
                .about("Ledger entries")
                .subcommand(entry_fields(
                    Command::new("add").about("Record an entry by hand"),
                    true,
                ))
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List entries, newest first")
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(Arg::new("kind").long("kind").help("expense|income"))
                        .arg(Arg::new("category").long("category")),
                ))
                .subcommand(entry_fields(
                    Command::new("edit")
                        .about("Change fields of an entry")
                        .arg(Arg::new("id").long("id").required(true)),
                    false,
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete an entry")
                        .arg(Arg::new("id").long("id").required(true)),
                )
                .subcommand(
                    Command::new("parse")
                        .about("Turn free text into entries with the language model")
                        .arg(Arg::new("text").long("text").required(true))
                        .arg(
                            Arg::new("via")
                                .long("via")
                                .default_value("model")
                                .value_parser(["model", "workflow"]),
                        ),
                ),
        )
        .subcommand(json_flags(
            Command::new("summary")
                .about("Per-category totals for a week, month or year")
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .default_value("expense")
                        .help("expense|income"),
                )
                .arg(
                    Arg::new("period")
                        .long("period")
                        .default_value("month")
                        .help("week|month|year"),
                )
                .arg(
                    Arg::new("offset")
                        .long("offset")
                        .default_value("0")
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(i32))
                        .help("0 = current period, -1 = previous, ..."),
                )
                .arg(
                    Arg::new("at")
                        .long("at")
                        .help("Reference timestamp (default: now)"),
                ),
        ))
        .subcommand(
            Command::new("report")
                .about("AI spending analysis")
                .subcommand(Command::new("generate").about("Request a new analysis"))
                .subcommand(Command::new("show").about("Show the most recent analysis")),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("entries")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("demo")
                .about("Sample data")
                .subcommand(
                    Command::new("seed")
                        .about("Insert a generated ledger covering recent days")
                        .arg(
                            Arg::new("days")
                                .long("days")
                                .default_value("90")
                                .value_parser(value_parser!(u32)),
                        ),
                )
                .subcommand(Command::new("text").about("Print a sample free-text input")),
        )
}
