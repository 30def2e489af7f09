// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Application state driven by the command layer: configuration, the entry
//! store, the latest report and the text-generation backend.
//!
//! Requests borrow the `App` mutably for their whole duration, so a second
//! submission cannot start while one is in flight.

use chrono::NaiveDateTime;
use rusqlite::Connection;

use crate::config::Config;
use crate::db;
use crate::error::TallyResult;
use crate::llm::TextGenerator;
use crate::models::{AnalysisReport, LedgerEntry};
use crate::requesters::{parse, report};
use crate::store::{EntryStore, Notice, StoreEvent};
use crate::workflow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseBackend {
    Model,
    Workflow,
}

pub struct App<'c> {
    pub config: Config,
    pub store: EntryStore<'c>,
    latest_report: Option<AnalysisReport>,
    generator: Box<dyn TextGenerator + 'c>,
}

impl<'c> App<'c> {
    pub fn load(conn: &'c Connection, generator: Box<dyn TextGenerator + 'c>) -> TallyResult<Self> {
        let config = Config::load(conn)?;
        let store = EntryStore::load(conn)?;
        let latest_report = db::latest_report(conn)?;
        Ok(Self {
            config,
            store,
            latest_report,
            generator,
        })
    }

    pub fn latest_report(&self) -> Option<&AnalysisReport> {
        self.latest_report.as_ref()
    }

    pub fn save_config(&self) -> TallyResult<()> {
        self.config.save(self.store.conn())
    }

    pub fn notify(&mut self, notice: Notice) {
        self.store.publish(StoreEvent::Notice(notice));
    }

    /// Classify `text` into new entries and store them. On failure nothing is
    /// stored and an error notice is published.
    pub fn parse_text(
        &mut self,
        text: &str,
        backend: ParseBackend,
    ) -> TallyResult<Vec<LedgerEntry>> {
        let result = match backend {
            ParseBackend::Model => {
                parse::request_entries(&self.config, self.generator.as_ref(), text)
            }
            ParseBackend::Workflow => {
                workflow::accountings_from_text(&self.config, text).map(|r| r.into_entries())
            }
        };
        let entries = self.surface(result)?;
        let stored = self.store.add_many(entries.clone());
        self.surface(stored)?;
        self.notify(Notice::info(format!("Recorded {} entries", entries.len())));
        Ok(entries)
    }

    /// Generate and store a spending analysis. Prior report is kept on failure.
    pub fn generate_report(&mut self, now: NaiveDateTime) -> TallyResult<AnalysisReport> {
        let result = report::request_report(
            &self.config,
            self.generator.as_ref(),
            self.store.entries(),
            now,
        );
        let new_report = self.surface(result)?;
        let stored = db::insert_report(self.store.conn(), &new_report);
        self.surface(stored)?;
        tracing::info!(id = %new_report.id, "analysis report stored");
        self.store.publish(StoreEvent::ReportCreated(new_report.id));
        self.latest_report = Some(new_report.clone());
        Ok(new_report)
    }

    fn surface<T>(&mut self, result: TallyResult<T>) -> TallyResult<T> {
        if let Err(e) = &result {
            tracing::warn!(error = %e, "request failed");
            self.notify(Notice::error(e));
        }
        result
    }
}
