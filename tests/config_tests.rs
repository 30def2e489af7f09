// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use tally::config::{self, Config, SETTINGS_KEY};
use tally::db;
use tally::error::TallyError;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

#[test]
fn defaults_without_stored_blob() {
    let conn = setup();
    let cfg = Config::load(&conn).unwrap();
    assert_eq!(cfg.openai_model(), "gpt-4o");
    assert_eq!(cfg.openai_base_url(), "https://api.openai.com/v1");
    assert!(matches!(cfg.openai_api_key(), Err(TallyError::Config(_))));
}

#[test]
fn save_and_load_round_trip() {
    let conn = setup();
    let mut cfg = Config::load(&conn).unwrap();
    cfg.set(config::OPENAI_API_KEY, "  sk-test-123  ").unwrap();
    cfg.set(config::OPENAI_MODEL, "gpt-4o-mini").unwrap();
    cfg.save(&conn).unwrap();

    let loaded = Config::load(&conn).unwrap();
    assert_eq!(loaded, cfg);
    assert_eq!(loaded.openai_api_key().unwrap(), "sk-test-123");
    assert_eq!(loaded.openai_model(), "gpt-4o-mini");
}

#[test]
fn blank_key_is_a_config_error() {
    let mut cfg = Config::default();
    cfg.set(config::OPENAI_API_KEY, "   ").unwrap();
    let err = cfg.openai_api_key().unwrap_err();
    assert!(err.to_string().contains("Invalid OpenAI API key"));
}

#[test]
fn unknown_keys_rejected_and_dropped() {
    let conn = setup();
    let mut cfg = Config::default();
    assert!(matches!(cfg.set("colour", "blue"), Err(TallyError::Config(_))));

    db::set_setting(
        &conn,
        SETTINGS_KEY,
        r#"{"openai_api_key":"k","colour":"blue"}"#,
    )
    .unwrap();
    let loaded = Config::load(&conn).unwrap();
    assert_eq!(loaded.get("colour"), None);
    assert_eq!(loaded.openai_api_key().unwrap(), "k");
    // missing keys keep defaults
    assert_eq!(loaded.openai_model(), "gpt-4o");
}

#[test]
fn unreadable_blob_falls_back_to_defaults() {
    let conn = setup();
    db::set_setting(&conn, SETTINGS_KEY, "not json").unwrap();
    assert_eq!(Config::load(&conn).unwrap(), Config::default());
}

#[test]
fn unset_restores_default() {
    let mut cfg = Config::default();
    cfg.set(config::OPENAI_BASE_URL, "http://localhost:8080/v1").unwrap();
    cfg.unset(config::OPENAI_BASE_URL).unwrap();
    assert_eq!(cfg.openai_base_url(), "https://api.openai.com/v1");
    assert!(cfg.unset("nope").is_err());
}
