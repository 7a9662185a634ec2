// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calculator::net_pay;
use crate::ledger::Ledger;
use crate::store::SqliteStore;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let ledger = Ledger::load(&SqliteStore::new(conn))?;
    let mut rows = Vec::new();

    // Same employee and month processed more than once. Reported, never merged.
    for (employee, month, n) in ledger.duplicate_runs() {
        rows.push(vec![
            "duplicate_run".into(),
            format!("{} {} x{}", employee, month, n),
        ]);
    }

    // Deductions larger than earnings, or totals that do not fit
    for r in ledger.records() {
        let issue = match net_pay(&r.components) {
            Ok(n) if n < Decimal::ZERO => "negative_net_pay",
            Ok(_) => continue,
            Err(_) => "amount_overflow",
        };
        rows.push(vec![
            issue.into(),
            format!("{} {} ({})", r.employee_key, r.month, r.id),
        ]);
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
