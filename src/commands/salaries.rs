// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calculator::net_pay;
use crate::error::{PayrollError, PayrollResult};
use crate::ledger::Ledger;
use crate::models::{RawSalaryFields, RecordId};
use crate::report::to_payslip;
use crate::store::SqliteStore;
use crate::utils::{fmt_timestamp, maybe_print_json, pretty_table};
use crate::validator::validate;
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::Connection;
use serde::Serialize;
use std::path::Path;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let mut store = SqliteStore::new(conn);
    let mut ledger = Ledger::load(&store)?;
    match m.subcommand() {
        Some(("process", sub)) => process(&mut ledger, sub)?,
        Some(("edit", sub)) => edit(&mut ledger, sub)?,
        Some(("rm", sub)) => remove(&mut ledger, sub)?,
        Some(("list", sub)) => list(&ledger, sub)?,
        Some(("show", sub)) => show(&ledger, sub)?,
        Some(("payslip", sub)) => write_payslip(&ledger, sub)?,
        _ => {}
    }
    ledger.flush(&mut store)
}

fn arg(sub: &clap::ArgMatches, name: &str) -> Option<String> {
    sub.get_one::<String>(name).cloned()
}

/// Overlay whatever fields were passed on the command line onto `draft`.
pub fn apply_args(mut draft: RawSalaryFields, sub: &clap::ArgMatches) -> RawSalaryFields {
    let slots: [(&str, &mut String); 9] = [
        ("employee", &mut draft.employee_key),
        ("month", &mut draft.month),
        ("worked_days", &mut draft.worked_days),
        ("lop_days", &mut draft.lop_days),
        ("basic", &mut draft.basic),
        ("bonus", &mut draft.bonus),
        ("pf", &mut draft.pf),
        ("professional_tax", &mut draft.professional_tax),
        ("tds", &mut draft.tds),
    ];
    for (name, slot) in slots {
        if let Some(v) = arg(sub, name) {
            *slot = v;
        }
    }
    draft
}

fn parse_id(sub: &clap::ArgMatches) -> Result<RecordId> {
    let raw = sub.get_one::<String>("id").unwrap();
    raw.parse::<RecordId>()
        .with_context(|| format!("Invalid record id '{}'", raw.trim()))
}

fn process(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let fields = validate(&apply_args(RawSalaryFields::default(), sub))?;
    let rec = ledger.create(fields, Utc::now());
    println!(
        "Processed salary for {} ({}): net pay {:.2} [id {}]",
        rec.employee_key,
        rec.month,
        net_pay(&rec.components)?,
        rec.id
    );
    Ok(())
}

fn edit(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub)?;
    let Some(draft) = ledger.begin_edit(id) else {
        println!("No salary run with id {}; nothing to edit", id);
        return Ok(());
    };
    let fields = validate(&apply_args(draft.to_raw(), sub))?;
    if let Some(rec) = ledger.save(id, fields, Utc::now()) {
        println!(
            "Updated salary run {} ({}, {}): net pay {:.2}",
            rec.id,
            rec.employee_key,
            rec.month,
            net_pay(&rec.components)?
        );
    }
    Ok(())
}

fn remove(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub)?;
    if ledger.delete(id) {
        println!("Removed salary run {}", id);
    } else {
        println!("No salary run with id {}; nothing removed", id);
    }
    Ok(())
}

#[derive(Serialize)]
pub struct SalaryRow {
    pub id: String,
    pub employee: String,
    pub month: String,
    pub worked_days: u32,
    pub lop_days: u32,
    pub basic: String,
    pub bonus: String,
    pub pf: String,
    pub professional_tax: String,
    pub tds: String,
    pub net_pay: String,
    pub created_at: String,
    pub updated_at: String,
}

pub fn query_rows(ledger: &Ledger, search: &str) -> PayrollResult<Vec<SalaryRow>> {
    ledger
        .find(search)
        .map(|r| {
            let c = &r.components;
            Ok(SalaryRow {
                id: r.id.to_string(),
                employee: r.employee_key.clone(),
                month: r.month.clone(),
                worked_days: c.worked_days,
                lop_days: c.lop_days,
                basic: c.basic.to_string(),
                bonus: c.bonus.to_string(),
                pf: c.pf.to_string(),
                professional_tax: c.professional_tax.to_string(),
                tds: c.tds.to_string(),
                net_pay: format!("{:.2}", net_pay(c)?),
                created_at: fmt_timestamp(&r.created_at),
                updated_at: fmt_timestamp(&r.updated_at),
            })
        })
        .collect()
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let search = sub.get_one::<String>("search").map(String::as_str).unwrap_or("");
    let data = query_rows(ledger, search)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .into_iter()
            .map(|r| {
                vec![
                    r.id,
                    r.employee,
                    r.month,
                    r.worked_days.to_string(),
                    r.lop_days.to_string(),
                    r.basic,
                    r.bonus,
                    r.pf,
                    r.professional_tax,
                    r.tds,
                    r.net_pay,
                    r.created_at,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "ID", "Emp Email ID", "Month", "Worked", "LOP", "Basic", "Bonus", "PF",
                    "Tax", "TDS", "Net Pay", "Timestamp",
                ],
                rows,
            )
        );
    }
    Ok(())
}

fn show(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub)?;
    let rec = ledger.get(id).ok_or_else(|| PayrollError::NotFound {
        id: id.to_string(),
    })?;
    print!("{}", to_payslip(rec)?);
    Ok(())
}

fn write_payslip(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub)?;
    let rec = ledger.get(id).ok_or_else(|| PayrollError::NotFound {
        id: id.to_string(),
    })?;
    let slip = to_payslip(rec)?;
    let dir = Path::new(sub.get_one::<String>("out").unwrap().trim());
    std::fs::create_dir_all(dir).with_context(|| format!("Create {}", dir.display()))?;
    // Text rendition of the PDF, named after it
    let path = dir.join(Path::new(&slip.file_name).with_extension("txt"));
    std::fs::write(&path, slip.to_string())
        .with_context(|| format!("Write payslip {}", path.display()))?;
    println!("Wrote payslip to {}", path.display());
    Ok(())
}
