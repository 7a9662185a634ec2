// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calculator::{SalaryInfo, monthly_breakdown};
use crate::utils::{maybe_print_json, pretty_table};
use crate::validator::lenient_decimal;
use anyhow::{Result, anyhow};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("monthly", sub)) => monthly(sub),
        _ => Ok(()),
    }
}

/// `key=value` pairs into a salary sheet. Values use the lenient numeric parse.
pub fn parse_fields<'a, I>(employee_id: &str, pairs: I) -> Result<SalaryInfo>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut info = SalaryInfo {
        employee_id: employee_id.trim().to_string(),
        ..SalaryInfo::default()
    };
    for pair in pairs {
        let (k, v) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("Invalid field '{}', expected key=value", pair))?;
        let k = k.trim();
        if k.is_empty() {
            return Err(anyhow!("Invalid field '{}', empty key", pair));
        }
        match k {
            "monthly" => info.monthly = matches!(v.trim(), "true" | "1" | "yes"),
            "empId" | "employee_id" => info.employee_id = v.trim().to_string(),
            _ => {
                info.components.insert(k.to_string(), lenient_decimal(v));
            }
        }
    }
    Ok(info)
}

fn monthly(sub: &clap::ArgMatches) -> Result<()> {
    let employee = sub.get_one::<String>("employee").unwrap();
    let pairs = sub.get_many::<String>("field").into_iter().flatten();
    let info = parse_fields(employee, pairs)?;
    let breakdown = monthly_breakdown(&info);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &breakdown)? {
        println!("Monthly salary breakdown for {}", breakdown.employee_id);
        let rows = breakdown
            .components
            .iter()
            .map(|(k, v)| vec![k.clone(), v.to_string()])
            .collect();
        println!("{}", pretty_table(&["Component", "Monthly"], rows));
    }
    Ok(())
}
