// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::report::read_csv;
use crate::store::SqliteStore;
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::Connection;
use std::fs::File;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("salaries", sub)) => import_salaries(conn, sub),
        _ => Ok(()),
    }
}

fn import_salaries(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let file = File::open(path).with_context(|| format!("Open CSV {}", path))?;
    // Parse everything first so a bad row leaves the ledger untouched
    let rows = read_csv(file).with_context(|| format!("Read CSV {}", path))?;

    let mut store = SqliteStore::new(conn);
    let mut ledger = Ledger::load(&store)?;
    let now = Utc::now();
    let count = rows.len();
    for row in rows {
        ledger.create(row.fields, row.timestamp.unwrap_or(now));
    }
    ledger.flush(&mut store)?;
    println!("Imported {} salary runs from {}", count, path);
    Ok(())
}
