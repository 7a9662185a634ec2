// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, TimeZone, Utc};
use payclip::db::init_schema;
use payclip::ledger::Ledger;
use payclip::models::{RawSalaryFields, RecordId, ValidatedFields};
use payclip::store::{MemoryStore, SalaryStore, SqliteStore};
use payclip::validator::validate;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn at(h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 31, h, 0, 0).unwrap()
}

fn fields(key: &str, month: &str, basic: &str) -> ValidatedFields {
    validate(&RawSalaryFields {
        employee_key: key.into(),
        month: month.into(),
        worked_days: "22".into(),
        basic: basic.into(),
        pf: "600".into(),
        ..RawSalaryFields::default()
    })
    .unwrap()
}

#[test]
fn create_stamps_both_timestamps() {
    let mut ledger = Ledger::new();
    let rec = ledger.create(fields("alice@example.com", "2025-05-01", "5000"), at(9));
    assert_eq!(rec.created_at, at(9));
    assert_eq!(rec.updated_at, at(9));
    assert_eq!(ledger.len(), 1);
    assert!(ledger.is_dirty());
}

#[test]
fn save_preserves_created_at_and_refreshes_updated_at() {
    let mut ledger = Ledger::new();
    let rec = ledger.create(fields("alice@example.com", "2025-05-01", "5000"), at(9));

    let mut draft = ledger.begin_edit(rec.id).unwrap().to_raw();
    draft.basic = "6000".into();
    let saved = ledger
        .save(rec.id, validate(&draft).unwrap(), at(14))
        .unwrap();

    assert_eq!(saved.id, rec.id);
    assert_eq!(saved.created_at, at(9));
    assert_eq!(saved.updated_at, at(14));
    assert_eq!(saved.components.basic, Decimal::from(6000));
    assert_eq!(saved.employee_key, rec.employee_key);
    assert_eq!(ledger.len(), 1);
}

#[test]
fn begin_edit_leaves_record_in_place() {
    let mut ledger = Ledger::new();
    let rec = ledger.create(fields("bob@example.com", "2025-05-01", "4000"), at(9));
    let draft = ledger.begin_edit(rec.id).unwrap();
    assert_eq!(draft, rec.fields());
    assert_eq!(ledger.get(rec.id), Some(&rec));
}

#[test]
fn delete_of_unknown_id_is_a_no_op() {
    let mut ledger = Ledger::new();
    ledger.create(fields("alice@example.com", "2025-05-01", "5000"), at(9));
    assert!(!ledger.delete(RecordId::new()));
    assert_eq!(ledger.len(), 1);
}

#[test]
fn unknown_id_edit_and_save_are_no_ops() {
    let mut ledger = Ledger::new();
    let ghost = RecordId::new();
    assert!(ledger.begin_edit(ghost).is_none());
    assert!(
        ledger
            .save(ghost, fields("x@example.com", "2025-05-01", "1"), at(10))
            .is_none()
    );
    assert!(ledger.is_empty());
    assert!(!ledger.is_dirty());
}

#[test]
fn edit_survives_delete_of_an_earlier_record() {
    let mut ledger = Ledger::new();
    let first = ledger.create(fields("alice@example.com", "2025-05-01", "5000"), at(9));
    let second = ledger.create(fields("bob@example.com", "2025-05-01", "4000"), at(10));

    let mut draft = ledger.begin_edit(second.id).unwrap().to_raw();
    assert!(ledger.delete(first.id));
    draft.bonus = "250".into();
    let saved = ledger
        .save(second.id, validate(&draft).unwrap(), at(11))
        .unwrap();

    assert_eq!(saved.employee_key, "bob@example.com");
    assert_eq!(saved.components.bonus, Decimal::from(250));
    assert_eq!(ledger.len(), 1);
}

#[test]
fn find_matches_key_or_month_ignoring_case() {
    let mut ledger = Ledger::new();
    ledger.create(fields("Alice@Example.com", "2025-05-01", "5000"), at(9));
    ledger.create(fields("bob@example.com", "2025-04-01", "4000"), at(9));
    ledger.create(fields("carol@example.com", "2025-05-01", "4500"), at(9));

    let by_key: Vec<_> = ledger.find("ALICE").map(|r| r.employee_key.as_str()).collect();
    assert_eq!(by_key, vec!["Alice@Example.com"]);

    let by_month: Vec<_> = ledger.find(" 2025-05 ").map(|r| r.employee_key.as_str()).collect();
    assert_eq!(by_month, vec!["Alice@Example.com", "carol@example.com"]);

    assert_eq!(ledger.find("").count(), 3);
    assert_eq!(ledger.find("nobody").count(), 0);
}

#[test]
fn duplicate_runs_are_kept_and_reported() {
    let mut ledger = Ledger::new();
    ledger.create(fields("alice@example.com", "2025-05-01", "5000"), at(9));
    ledger.create(fields("ALICE@example.com", "2025-05-01", "5100"), at(10));
    ledger.create(fields("bob@example.com", "2025-05-01", "4000"), at(10));
    assert_eq!(ledger.len(), 3);
    assert_eq!(
        ledger.duplicate_runs(),
        vec![("alice@example.com".to_string(), "2025-05-01".to_string(), 2)]
    );
}

#[test]
fn flush_writes_only_when_dirty() {
    let mut store = MemoryStore::new();
    let mut ledger = Ledger::load(&store).unwrap();
    ledger.flush(&mut store).unwrap();
    assert!(store.load().unwrap().is_empty());

    let rec = ledger.create(fields("alice@example.com", "2025-05-01", "5000"), at(9));
    ledger.flush(&mut store).unwrap();
    assert!(!ledger.is_dirty());

    let reloaded = Ledger::load(&store).unwrap();
    assert_eq!(reloaded.records(), &[rec]);
}

#[test]
fn sqlite_store_round_trips_records_in_order() {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    let mut store = SqliteStore::new(&conn);

    let mut ledger = Ledger::load(&store).unwrap();
    let a = ledger.create(fields("zed@example.com", "2025-05-01", "5000.50"), at(9));
    let b = ledger.create(fields("amy@example.com", "2025-05-01", "4000"), at(10));
    ledger.save(a.id, fields("zed@example.com", "2025-05-01", "5200"), at(12));
    ledger.flush(&mut store).unwrap();

    let reloaded = Ledger::load(&store).unwrap();
    let ids: Vec<_> = reloaded.records().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![a.id, b.id]);
    let first = reloaded.get(a.id).unwrap();
    assert_eq!(first.components.basic, Decimal::from(5200));
    assert_eq!(first.created_at, at(9));
    assert_eq!(first.updated_at, at(12));

    let mut again = reloaded;
    again.delete(b.id);
    again.flush(&mut store).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM salary_runs", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
}
