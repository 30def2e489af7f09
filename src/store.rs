// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! In-memory mirror of the `entries` table, kept newest first, with a change
//! feed for anything that renders it.

use std::sync::mpsc::{Receiver, Sender, channel};

use rusqlite::Connection;
use uuid::Uuid;

use crate::db;
use crate::error::{TallyError, TallyResult};
use crate::models::LedgerEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub is_error: bool,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            is_error: false,
            text: text.into(),
        }
    }

    pub fn error(err: &dyn std::fmt::Display) -> Self {
        Self {
            is_error: true,
            text: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Added(Vec<Uuid>),
    Updated(Uuid),
    Removed(Uuid),
    ReportCreated(Uuid),
    Notice(Notice),
}

pub struct EntryStore<'c> {
    conn: &'c Connection,
    entries: Vec<LedgerEntry>,
    subscribers: Vec<Sender<StoreEvent>>,
}

impl<'c> EntryStore<'c> {
    pub fn load(conn: &'c Connection) -> TallyResult<Self> {
        let entries = db::load_entries(conn)?;
        tracing::debug!(count = entries.len(), "loaded ledger entries");
        Ok(Self {
            conn,
            entries,
            subscribers: Vec::new(),
        })
    }

    pub fn conn(&self) -> &'c Connection {
        self.conn
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&LedgerEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    pub(crate) fn publish(&mut self, event: StoreEvent) {
        self.subscribers.retain(|s| s.send(event.clone()).is_ok());
    }

    pub fn add(&mut self, entry: LedgerEntry) -> TallyResult<()> {
        db::insert_entry(self.conn, &entry)?;
        let id = entry.id;
        self.insert_sorted(entry);
        self.publish(StoreEvent::Added(vec![id]));
        Ok(())
    }

    /// Persist in one transaction, then place each entry in order. Entries
    /// sharing a timestamp stay in the order given.
    pub fn add_many(&mut self, entries: Vec<LedgerEntry>) -> TallyResult<()> {
        if entries.is_empty() {
            return Ok(());
        }
        db::insert_entries(self.conn, &entries)?;
        let ids: Vec<Uuid> = entries.iter().map(|e| e.id).collect();
        for e in entries {
            self.insert_sorted(e);
        }
        tracing::info!(count = ids.len(), "entries added");
        self.publish(StoreEvent::Added(ids));
        Ok(())
    }

    pub fn update(&mut self, entry: LedgerEntry) -> TallyResult<()> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.id == entry.id)
            .ok_or_else(|| TallyError::NotFound(format!("entry {}", entry.id)))?;
        db::update_entry(self.conn, &entry)?;
        let moved = self.entries[pos].timestamp != entry.timestamp;
        let id = entry.id;
        self.entries[pos] = entry;
        if moved {
            self.entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        }
        self.publish(StoreEvent::Updated(id));
        Ok(())
    }

    pub fn remove(&mut self, id: Uuid) -> TallyResult<LedgerEntry> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| TallyError::NotFound(format!("entry {}", id)))?;
        db::delete_entry(self.conn, id)?;
        let removed = self.entries.remove(pos);
        self.publish(StoreEvent::Removed(id));
        Ok(removed)
    }

    fn insert_sorted(&mut self, entry: LedgerEntry) {
        let idx = self
            .entries
            .iter()
            .position(|e| e.timestamp < entry.timestamp)
            .unwrap_or(self.entries.len());
        self.entries.insert(idx, entry);
    }
}
