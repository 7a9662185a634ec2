// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::feed::FeedClient;
use crate::search::select_employee;
use crate::utils::{maybe_print_json, parse_date, pretty_table};
use anyhow::{Context, Result};
use std::path::Path;

pub fn handle(cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(cfg, sub)?,
        Some(("download", sub)) => download(cfg, sub)?,
        _ => {}
    }
    Ok(())
}

fn show(cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let term = sub.get_one::<String>("search").map(String::as_str).unwrap_or("");
    let entries = FeedClient::new(cfg)?.fetch_payroll()?;
    let Some(selected) = select_employee(&entries, term) else {
        println!("Enter an employee name or ID to view details.");
        return Ok(());
    };
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &selected)? {
        return Ok(());
    }
    if let Some(card) = selected.card() {
        let joined = parse_date(&card.doj)
            .map(|d| d.format("%a %b %d %Y").to_string())
            .unwrap_or_else(|_| card.doj.clone());
        println!("{}", card.name);
        println!("ID: {}", card.employee_id);
        println!("Role: {}", card.role);
        println!("Salary: {}", card.salary);
        println!("Date of Joining: {}", joined);
    }
    let rows = selected
        .records
        .iter()
        .map(|r| vec![r.month.clone(), r.slip_reference.clone()])
        .collect();
    println!("{}", pretty_table(&["Month", "Slip"], rows));
    Ok(())
}

fn download(cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let filename = sub.get_one::<String>("filename").unwrap().trim();
    let dir = Path::new(sub.get_one::<String>("out").unwrap().trim());
    let bytes = FeedClient::new(cfg)?.download_slip(filename)?;
    std::fs::create_dir_all(dir).with_context(|| format!("Create {}", dir.display()))?;
    let path = dir.join(filename);
    std::fs::write(&path, &bytes).with_context(|| format!("Write {}", path.display()))?;
    println!("Downloaded {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
