// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only renderings of the ledger: CSV, a report table for PDF/terminal
//! renderers and single-record payslips.

use crate::calculator::net_pay;
use crate::error::PayrollResult;
use crate::models::{ProcessedSalaryRecord, RawSalaryFields, ValidatedFields};
use crate::utils::{fmt_timestamp, parse_timestamp, pretty_table};
use crate::validator::validate;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use comfy_table::Table;
use serde::Serialize;
use std::fmt;
use std::io::Read;

pub const CSV_FILE_NAME: &str = "Processed_Salaries.csv";
pub const REPORT_FILE_NAME: &str = "Processed_Salaries.pdf";
pub const REPORT_TITLE: &str = "Processed Salary Report";
pub const CURRENCY: &str = "₹";
pub const PAYSLIP_DISCLAIMER: &str = "Note: This is a computer-generated payslip.";

pub const CSV_HEADER: [&str; 10] = [
    "Emp Email ID",
    "Month",
    "Worked Days",
    "LOP",
    "Basic",
    "Bonus",
    "PF",
    "Tax",
    "TDS",
    "Timestamp",
];

pub const REPORT_HEADER: [&str; 10] = [
    "Emp Email ID",
    "Month",
    "Worked",
    "LOP",
    "Basic",
    "Bonus",
    "PF",
    "Tax",
    "TDS",
    "Timestamp",
];

fn row_values(r: &ProcessedSalaryRecord) -> Vec<String> {
    let c = &r.components;
    vec![
        r.employee_key.clone(),
        r.month.clone(),
        c.worked_days.to_string(),
        c.lop_days.to_string(),
        c.basic.to_string(),
        c.bonus.to_string(),
        c.pf.to_string(),
        c.professional_tax.to_string(),
        c.tds.to_string(),
        fmt_timestamp(&r.created_at),
    ]
}

/// Header plus one line per record. Fields holding commas or quotes are quoted.
pub fn to_csv<'a, I>(records: I) -> Result<String>
where
    I: IntoIterator<Item = &'a ProcessedSalaryRecord>,
{
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(CSV_HEADER)?;
    for r in records {
        wtr.write_record(row_values(r))?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Flush CSV buffer: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

/// A row read back from an exported CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvSalaryRow {
    pub fields: ValidatedFields,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Parse CSV produced by [`to_csv`]. Amounts go through the same lenient
/// validation as form input.
pub fn read_csv<R: Read>(input: R) -> Result<Vec<CsvSalaryRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input);
    let mut out = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let rec = result?;
        let get = |idx: usize| rec.get(idx).unwrap_or("").to_string();
        let raw = RawSalaryFields {
            employee_key: get(0),
            month: get(1),
            worked_days: get(2),
            lop_days: get(3),
            basic: get(4),
            bonus: get(5),
            pf: get(6),
            professional_tax: get(7),
            tds: get(8),
        };
        let fields = validate(&raw).with_context(|| format!("CSV row {}", i + 1))?;
        let ts = get(9);
        let timestamp = if ts.trim().is_empty() {
            None
        } else {
            Some(parse_timestamp(ts.trim()).with_context(|| format!("CSV row {}", i + 1))?)
        };
        out.push(CsvSalaryRow { fields, timestamp });
    }
    Ok(out)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportTable {
    pub title: String,
    pub file_name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    pub fn render(&self) -> Table {
        let header: Vec<&str> = self.header.iter().map(String::as_str).collect();
        pretty_table(&header, self.rows.clone())
    }
}

impl fmt::Display for ReportTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        write!(f, "{}", self.render())
    }
}

pub fn to_report_table<'a, I>(records: I) -> ReportTable
where
    I: IntoIterator<Item = &'a ProcessedSalaryRecord>,
{
    ReportTable {
        title: REPORT_TITLE.to_string(),
        file_name: REPORT_FILE_NAME.to_string(),
        header: REPORT_HEADER.iter().map(|h| h.to_string()).collect(),
        rows: records.into_iter().map(row_values).collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payslip {
    pub title: String,
    pub file_name: String,
    pub lines: Vec<(String, String)>,
    pub disclaimer: String,
}

impl fmt::Display for Payslip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for (label, value) in &self.lines {
            writeln!(f, "{}: {}", label, value)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.disclaimer)
    }
}

/// Make a key or month label usable as one path component: separators
/// become `-` and `..` becomes `_`.
fn file_part(s: &str) -> String {
    s.trim().replace(['/', '\\'], "-").replace("..", "_")
}

pub fn payslip_file_name(r: &ProcessedSalaryRecord) -> String {
    format!(
        "{}_Payslip_{}.pdf",
        file_part(&r.employee_key),
        file_part(&r.month)
    )
}

pub fn to_payslip(r: &ProcessedSalaryRecord) -> PayrollResult<Payslip> {
    let c = &r.components;
    let money = |d: &rust_decimal::Decimal| format!("{}{}", CURRENCY, d);
    let lines = vec![
        ("Month", r.month.clone()),
        ("Employee ID", r.employee_key.clone()),
        ("Worked Days", c.worked_days.to_string()),
        ("LOP Days", c.lop_days.to_string()),
        ("Basic", money(&c.basic)),
        ("Bonus", money(&c.bonus)),
        ("PF", money(&c.pf)),
        ("Professional Tax", money(&c.professional_tax)),
        ("TDS", money(&c.tds)),
        ("Net Pay", format!("{}{:.2}", CURRENCY, net_pay(c)?)),
        ("Generated on", fmt_timestamp(&r.created_at)),
    ];
    Ok(Payslip {
        title: format!("Payslip - {}", r.month),
        file_name: payslip_file_name(r),
        lines: lines
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
        disclaimer: PAYSLIP_DISCLAIMER.to_string(),
    })
}
