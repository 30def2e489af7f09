// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! User-editable key/value configuration, persisted as one JSON blob in the
//! `settings` table under [`SETTINGS_KEY`].

use std::collections::BTreeMap;

use rusqlite::Connection;

use crate::db::{get_setting, set_setting};
use crate::error::{TallyError, TallyResult};

pub const SETTINGS_KEY: &str = "environment";

pub const OPENAI_API_KEY: &str = "openai_api_key";
pub const OPENAI_BASE_URL: &str = "openai_base_url";
pub const OPENAI_MODEL: &str = "openai_model";
pub const WORKFLOW_BASE_URL: &str = "workflow_base_url";
pub const WORKFLOW_ID: &str = "workflow_id";
pub const WORKFLOW_API_KEY: &str = "workflow_api_key";

/// Known keys and their defaults.
const DEFAULTS: [(&str, &str); 6] = [
    (OPENAI_API_KEY, ""),
    (OPENAI_BASE_URL, "https://api.openai.com/v1"),
    (OPENAI_MODEL, "gpt-4o"),
    (WORKFLOW_BASE_URL, "https://www.sim.ai"),
    (WORKFLOW_ID, ""),
    (WORKFLOW_API_KEY, ""),
];

/// Keys whose values are masked when shown.
pub const SECRET_KEYS: [&str; 2] = [OPENAI_API_KEY, WORKFLOW_API_KEY];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    values: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            values: DEFAULTS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl Config {
    /// Load the stored blob. Unknown keys are dropped; missing keys keep their defaults.
    /// An unreadable blob is ignored rather than failing startup.
    pub fn load(conn: &Connection) -> TallyResult<Config> {
        let mut cfg = Config::default();
        let Some(raw) = get_setting(conn, SETTINGS_KEY)? else {
            return Ok(cfg);
        };
        match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
            Ok(stored) => {
                for (k, v) in stored {
                    if let Some(slot) = cfg.values.get_mut(&k) {
                        *slot = v;
                    }
                }
            }
            Err(e) => tracing::warn!(error = %e, "ignoring unreadable configuration blob"),
        }
        Ok(cfg)
    }

    pub fn save(&self, conn: &Connection) -> TallyResult<()> {
        let blob = serde_json::to_string(&self.values)?;
        set_setting(conn, SETTINGS_KEY, &blob)
    }

    pub fn is_known(key: &str) -> bool {
        DEFAULTS.iter().any(|(k, _)| *k == key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: &str) -> TallyResult<()> {
        match self.values.get_mut(key) {
            Some(slot) => {
                *slot = value.trim().to_string();
                Ok(())
            }
            None => Err(TallyError::Config(format!("Unknown configuration key '{}'", key))),
        }
    }

    /// Reset a key to its default.
    pub fn unset(&mut self, key: &str) -> TallyResult<()> {
        let default = DEFAULTS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .ok_or_else(|| TallyError::Config(format!("Unknown configuration key '{}'", key)))?;
        self.set(key, default)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn required(&self, key: &str, what: &str) -> TallyResult<&str> {
        match self.get(key).map(str::trim) {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err(TallyError::Config(format!("Invalid {}", what))),
        }
    }

    pub fn openai_api_key(&self) -> TallyResult<&str> {
        self.required(OPENAI_API_KEY, "OpenAI API key")
    }

    pub fn openai_base_url(&self) -> &str {
        self.get(OPENAI_BASE_URL).unwrap_or("https://api.openai.com/v1")
    }

    pub fn openai_model(&self) -> &str {
        self.get(OPENAI_MODEL).unwrap_or("gpt-4o")
    }

    pub fn workflow_base_url(&self) -> &str {
        self.get(WORKFLOW_BASE_URL).unwrap_or("https://www.sim.ai")
    }

    pub fn workflow_id(&self) -> TallyResult<&str> {
        self.required(WORKFLOW_ID, "workflow id")
    }

    pub fn workflow_api_key(&self) -> TallyResult<&str> {
        self.required(WORKFLOW_API_KEY, "workflow API key")
    }
}
