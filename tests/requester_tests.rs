// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;
use rust_decimal::Decimal;
use tally::app::{App, ParseBackend};
use tally::config::{self, Config};
use tally::db;
use tally::error::{TallyError, TallyResult};
use tally::llm::{ChatRequest, ResponseFormat, TextGenerator};
use tally::models::{Category, LedgerEntry};
use tally::requesters::{parse, report};
use tally::store::StoreEvent;

/// Replies with a canned result and records every request it sees.
#[derive(Clone)]
struct Scripted {
    reply: Result<String, String>,
    seen: Rc<RefCell<Vec<ChatRequest>>>,
}

impl Scripted {
    fn ok(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            seen: Rc::default(),
        }
    }

    fn failing(msg: &str) -> Self {
        Self {
            reply: Err(msg.to_string()),
            seen: Rc::default(),
        }
    }

    fn calls(&self) -> usize {
        self.seen.borrow().len()
    }
}

impl TextGenerator for Scripted {
    fn generate(&self, _config: &Config, request: &ChatRequest) -> TallyResult<String> {
        self.seen.borrow_mut().push(request.clone());
        self.reply.clone().map_err(TallyError::Server)
    }
}

fn setup(with_key: bool) -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    if with_key {
        let mut cfg = Config::default();
        cfg.set(config::OPENAI_API_KEY, "sk-test").unwrap();
        cfg.save(&conn).unwrap();
    }
    conn
}

fn ts(m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

const REPLY: &str = r#"{"accountings":[
    {"category":"Transportation","amount":-2.5,"description":"shared bike"},
    {"category":"Groceries","amount":-6,"description":"two pork buns"},
    {"category":"Salary","amount":3800,"description":"salary"}
]}"#;

#[test]
fn parse_stores_entries_at_head_in_reply_order() {
    let conn = setup(true);
    let db_entry = LedgerEntry::at(ts(1, 1, 8), Category::Rent, Decimal::new(-4800, 0), "rent");
    db::insert_entry(&conn, &db_entry).unwrap();

    let generator = Scripted::ok(REPLY);
    let mut app = App::load(&conn, Box::new(generator.clone())).unwrap();
    let rx = app.store.subscribe();
    let created = app.parse_text("bike 2.5, buns 6, salary 3800", ParseBackend::Model).unwrap();

    assert_eq!(created.len(), 3);
    assert_eq!(created[1].category, Category::Other);
    assert_eq!(created[0].amount, "-2.5".parse::<Decimal>().unwrap());
    let descs: Vec<&str> = app.store.entries().iter().map(|e| e.description.as_str()).collect();
    assert_eq!(descs, vec!["shared bike", "two pork buns", "salary", "rent"]);
    assert_eq!(db::load_entries(&conn).unwrap().len(), 4);

    assert_eq!(generator.calls(), 1);
    let req = generator.seen.borrow()[0].clone();
    assert_eq!(req.user, "bike 2.5, buns 6, salary 3800");
    assert!(matches!(
        req.format,
        ResponseFormat::JsonSchema { ref name, .. } if name == "accounting_schema"
    ));

    let events: Vec<StoreEvent> = rx.try_iter().collect();
    assert!(matches!(&events[0], StoreEvent::Added(ids) if ids.len() == 3));
    assert!(matches!(&events[1], StoreEvent::Notice(n) if !n.is_error));
}

#[test]
fn parse_accepts_fenced_reply() {
    let conn = setup(true);
    let fenced = format!("```json\n{}\n```", REPLY);
    let mut app = App::load(&conn, Box::new(Scripted::ok(&fenced))).unwrap();
    assert_eq!(app.parse_text("x", ParseBackend::Model).unwrap().len(), 3);
}

#[test]
fn malformed_reply_creates_nothing() {
    let conn = setup(true);
    let mut app = App::load(&conn, Box::new(Scripted::ok(r#"{"items": []}"#))).unwrap();
    let rx = app.store.subscribe();
    let err = app.parse_text("lunch 30", ParseBackend::Model).unwrap_err();
    assert!(matches!(err, TallyError::Decode(_)));
    assert!(app.store.is_empty());
    assert!(db::load_entries(&conn).unwrap().is_empty());
    let events: Vec<StoreEvent> = rx.try_iter().collect();
    assert!(matches!(&events[..], [StoreEvent::Notice(n)] if n.is_error));
}

#[test]
fn parse_without_key_makes_no_call() {
    let conn = setup(false);
    let generator = Scripted::ok(REPLY);
    let mut app = App::load(&conn, Box::new(generator.clone())).unwrap();
    let err = app.parse_text("lunch 30", ParseBackend::Model).unwrap_err();
    assert!(matches!(err, TallyError::Config(_)));
    assert_eq!(generator.calls(), 0);
}

#[test]
fn network_failure_creates_nothing() {
    let conn = setup(true);
    let mut app = App::load(&conn, Box::new(Scripted::failing("connection reset"))).unwrap();
    let err = app.parse_text("lunch 30", ParseBackend::Model).unwrap_err();
    assert!(matches!(err, TallyError::Server(ref m) if m == "connection reset"));
    assert!(app.store.is_empty());
}

#[test]
fn unknown_category_becomes_other() {
    let reply = parse::decode_reply(
        r#"{"accountings":[{"category":"Pets","amount":-40,"description":"cat food"}]}"#,
    )
    .unwrap();
    let entries = reply.into_entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].category, Category::Other);
    assert_eq!(entries[0].description, "cat food");
}

#[test]
fn schema_is_closed() {
    let s = parse::schema();
    assert_eq!(s["additionalProperties"], false);
    let item = &s["properties"]["accountings"]["items"];
    assert_eq!(item["additionalProperties"], false);
    assert_eq!(item["required"].as_array().unwrap().len(), 3);
    let names = item["properties"]["category"]["enum"].as_array().unwrap();
    assert_eq!(names.len(), 7);
    assert_eq!(names[0], "Food");
    assert_eq!(names[6], "Other");
}

#[test]
fn report_with_no_entries_fails_before_any_call() {
    let conn = setup(true);
    let generator = Scripted::ok("advice");
    let mut app = App::load(&conn, Box::new(generator.clone())).unwrap();
    let err = app.generate_report(ts(3, 20, 12)).unwrap_err();
    assert!(matches!(err, TallyError::EmptyData));
    assert_eq!(generator.calls(), 0);
    assert!(app.latest_report().is_none());
}

#[test]
fn report_without_key_fails_before_any_call() {
    let conn = setup(false);
    let e = LedgerEntry::at(ts(3, 1, 8), Category::Food, Decimal::new(-10, 0), "x");
    db::insert_entry(&conn, &e).unwrap();
    let generator = Scripted::ok("advice");
    let mut app = App::load(&conn, Box::new(generator.clone())).unwrap();
    assert!(matches!(app.generate_report(ts(3, 20, 12)), Err(TallyError::Config(_))));
    assert_eq!(generator.calls(), 0);
}

#[test]
fn report_prompt_lists_months_newest_first() {
    let entries = vec![
        LedgerEntry::at(ts(3, 2, 12), Category::Food, "-12.5".parse().unwrap(), "X"),
        LedgerEntry::at(ts(1, 15, 20), Category::Rent, Decimal::new(-4800, 0), "Rent"),
        LedgerEntry::at(ts(1, 10, 20), Category::Salary, Decimal::new(8888, 0), "Salary"),
        LedgerEntry::at(ts(1, 11, 9), Category::Food, "-3.456".parse().unwrap(), "tea"),
    ];
    let prompt = report::build_prompt(&entries, ts(3, 20, 12)).unwrap();
    assert_eq!(
        prompt,
        "2025 ledger\n\
         March:\n  Food: -12.50\n\
         February:\n\
         January:\n  Food: -3.45\n  Rent: -4800.00\n  Salary: +8888.00\n"
    );
}

#[test]
fn report_is_stored_and_replaces_latest() {
    let conn = setup(true);
    let e = LedgerEntry::at(ts(3, 1, 8), Category::Food, Decimal::new(-10, 0), "x");
    db::insert_entry(&conn, &e).unwrap();

    let generator = Scripted::ok("## Advice\nSpend less on snacks.");
    let mut app = App::load(&conn, Box::new(generator.clone())).unwrap();
    let rep = app.generate_report(ts(3, 20, 12)).unwrap();
    assert_eq!(app.latest_report(), Some(&rep));
    assert_eq!(db::latest_report(&conn).unwrap().unwrap().content, rep.content);

    let req = generator.seen.borrow()[0].clone();
    assert_eq!(req.format, ResponseFormat::Text);
    assert!(req.system.contains("Markdown"));
    assert!(req.user.starts_with("2025 ledger\nMarch:\n"));
}

#[test]
fn failed_report_keeps_previous() {
    let conn = setup(true);
    let e = LedgerEntry::at(ts(3, 1, 8), Category::Food, Decimal::new(-10, 0), "x");
    db::insert_entry(&conn, &e).unwrap();
    let mut old = tally::models::AnalysisReport::new("old advice");
    old.timestamp = ts(2, 1, 8);
    db::insert_report(&conn, &old).unwrap();

    let mut app = App::load(&conn, Box::new(Scripted::failing("timeout"))).unwrap();
    assert!(app.generate_report(ts(3, 20, 12)).is_err());
    assert_eq!(app.latest_report(), Some(&old));

    let mut app = App::load(&conn, Box::new(Scripted::ok("   "))).unwrap();
    assert!(matches!(app.generate_report(ts(3, 20, 12)), Err(TallyError::Decode(_))));
    assert_eq!(db::latest_report(&conn).unwrap().unwrap(), old);
}

#[test]
fn report_with_unsummable_totals_fails_before_any_call() {
    let conn = setup(true);
    let huge: Decimal = "-50000000000000000000000000000".parse().unwrap();
    for desc in ["a", "b"] {
        let e = LedgerEntry::at(ts(3, 1, 8), Category::Food, huge, desc);
        db::insert_entry(&conn, &e).unwrap();
    }
    let generator = Scripted::ok("advice");
    let mut app = App::load(&conn, Box::new(generator.clone())).unwrap();
    let rx = app.store.subscribe();
    let err = app.generate_report(ts(3, 20, 12)).unwrap_err();
    assert!(matches!(err, TallyError::Overflow(_)));
    assert_eq!(generator.calls(), 0);
    assert!(app.latest_report().is_none());
    let events: Vec<StoreEvent> = rx.try_iter().collect();
    assert!(matches!(&events[..], [StoreEvent::Notice(n)] if n.is_error));
}
