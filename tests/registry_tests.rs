// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use payclip::PayrollError;
use payclip::db::init_schema;
use payclip::models::Employee;
use payclip::registry::EmployeeRegistry;
use rusqlite::Connection;

fn employee(id: &str, name: &str) -> Employee {
    Employee {
        id: id.into(),
        name: name.into(),
        designation: "Engineer".into(),
        doj: "2022-03-15".into(),
        ..Employee::default()
    }
}

#[test]
fn add_rejects_blank_and_duplicate_ids() {
    let mut reg = EmployeeRegistry::new();
    reg.add(employee("E001", "Alice Johnson")).unwrap();
    assert_eq!(
        reg.add(employee("  ", "Nobody")),
        Err(PayrollError::MissingField { field: "empId" })
    );
    assert_eq!(
        reg.add(employee(" e001 ", "Alice Again")),
        Err(PayrollError::DuplicateEmployee { id: "e001".into() })
    );
    assert_eq!(reg.list().len(), 1);
}

#[test]
fn add_rejects_malformed_join_date() {
    let mut reg = EmployeeRegistry::new();
    let mut e = employee("E002", "Bob Singh");
    e.doj = "15/03/2022".into();
    assert!(matches!(
        reg.add(e),
        Err(PayrollError::InvalidField { field, .. }) if field == "doj"
    ));
}

#[test]
fn update_remove_and_search() {
    let mut reg = EmployeeRegistry::new();
    reg.add(employee("E001", "Alice Johnson")).unwrap();
    reg.add(employee("E002", "Bob Singh")).unwrap();

    let mut bob = employee("E002", "Bob Singh");
    bob.designation = "Lead".into();
    reg.update(bob).unwrap();
    assert_eq!(reg.get("e002").unwrap().designation, "Lead");
    assert!(matches!(
        reg.update(employee("E404", "Ghost")),
        Err(PayrollError::NotFound { .. })
    ));

    let hits: Vec<_> = reg.search("SINGH").iter().map(|e| e.id.clone()).collect();
    assert_eq!(hits, vec!["E002"]);
    assert_eq!(reg.search("").len(), 2);

    assert!(reg.remove("E001"));
    assert!(!reg.remove("E001"));
    assert_eq!(reg.list().len(), 1);
}

#[test]
fn registry_persists_in_order() {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    let mut reg = EmployeeRegistry::load(&conn).unwrap();
    reg.add(employee("E003", "Carol Danvers")).unwrap();
    reg.add(employee("E001", "Alice Johnson")).unwrap();
    reg.upsert(employee("E003", "Carol Danvers-Rambeau")).unwrap();
    reg.flush(&conn).unwrap();

    let loaded = EmployeeRegistry::load(&conn).unwrap();
    let names: Vec<_> = loaded.list().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Carol Danvers-Rambeau", "Alice Johnson"]);
}

#[test]
fn sync_skips_invalid_rows_and_keeps_the_rest() {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    let mut reg = EmployeeRegistry::load(&conn).unwrap();
    reg.add(employee("E001", "Alice Johnson")).unwrap();

    let mut bad_doj = employee("E005", "Frank Ocean");
    bad_doj.doj = "01-07-2023".into();
    let fetched = vec![
        employee("", "No Id"),
        bad_doj,
        employee("E001", "Alice J. Johnson"),
        employee("E006", "Grace Hopper"),
    ];
    assert_eq!(reg.sync(fetched), 2);
    reg.flush(&conn).unwrap();

    let loaded = EmployeeRegistry::load(&conn).unwrap();
    let ids: Vec<_> = loaded.list().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["E001", "E006"]);
    assert_eq!(loaded.get("E001").unwrap().name, "Alice J. Johnson");
}
