// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures surfaced by the ledger store and the model-backed requesters.
#[derive(Debug, Error)]
pub enum TallyError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Empty Data")]
    EmptyData,
    #[error("Server error: {0}")]
    Server(String),
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Amount out of range: {0}")]
    Overflow(String),
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

pub type TallyResult<T> = std::result::Result<T, TallyError>;

impl From<reqwest::Error> for TallyError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            TallyError::Decode(e.to_string())
        } else {
            TallyError::Server(e.to_string())
        }
    }
}

impl From<serde_json::Error> for TallyError {
    fn from(e: serde_json::Error) -> Self {
        TallyError::Decode(e.to_string())
    }
}
