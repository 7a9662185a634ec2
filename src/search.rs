// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only views over the payroll feed: per-employee grouping and the
//! "selected employee" lookup used by the payroll screen.

use crate::models::{Employee, PayrollSlipEntry};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeSlips {
    pub employee_id: String,
    pub records: Vec<PayrollSlipEntry>,
}

impl EmployeeSlips {
    /// The first feed entry carries the employee card (name, role, salary, doj).
    pub fn card(&self) -> Option<&PayrollSlipEntry> {
        self.records.first()
    }
}

/// Group entries by employee id, ignoring case. Groups appear in the order
/// their first entry was seen and keep feed order inside.
pub fn group_by_employee<'a, I>(entries: I) -> Vec<EmployeeSlips>
where
    I: IntoIterator<Item = &'a PayrollSlipEntry>,
{
    let mut groups: Vec<EmployeeSlips> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for e in entries {
        let key = e.employee_id.trim().to_lowercase();
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(EmployeeSlips {
                employee_id: e.employee_id.clone(),
                records: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].records.push(e.clone());
    }
    groups
}

/// Only the first matching employee is surfaced, even when the term matches
/// several. A blank term selects nobody.
pub fn select_employee(entries: &[PayrollSlipEntry], term: &str) -> Option<EmployeeSlips> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return None;
    }
    let matching = entries.iter().filter(|e| {
        format!("{}_{}", e.employee_id, e.name)
            .to_lowercase()
            .contains(&term)
    });
    group_by_employee(matching).into_iter().next()
}

/// Case-insensitive substring search over employee id and name.
pub fn search_employees<'a>(
    employees: &'a [Employee],
    term: &str,
) -> impl Iterator<Item = &'a Employee> + use<'a> {
    let term = term.trim().to_lowercase();
    employees.iter().filter(move |e| {
        e.id.to_lowercase().contains(&term) || e.name.to_lowercase().contains(&term)
    })
}
