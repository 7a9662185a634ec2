// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::salaries::query_rows;
use crate::ledger::Ledger;
use crate::report::{CSV_FILE_NAME, to_csv, to_report_table};
use crate::store::SqliteStore;
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use tracing::info;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("salaries", sub)) => export_salaries(conn, sub),
        _ => Ok(()),
    }
}

fn export_salaries(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().trim().to_lowercase();
    let search = sub.get_one::<String>("search").map(String::as_str).unwrap_or("");
    let default_out = match fmt.as_str() {
        "csv" => CSV_FILE_NAME,
        "json" => "Processed_Salaries.json",
        "report" => "Processed_Salaries.txt",
        _ => return Err(anyhow!("Unknown format: {} (use csv|json|report)", fmt)),
    };
    let out = sub
        .get_one::<String>("out")
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| default_out.to_string());

    let ledger = Ledger::load(&SqliteStore::new(conn))?;
    let contents = match fmt.as_str() {
        "csv" => to_csv(ledger.find(search))?,
        "json" => serde_json::to_string_pretty(&query_rows(&ledger, search)?)?,
        _ => to_report_table(ledger.find(search)).to_string(),
    };
    std::fs::write(&out, contents)?;
    info!(format = %fmt, path = %out, "salaries exported");
    println!("Exported processed salaries to {}", out);
    Ok(())
}
