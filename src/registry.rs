// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Employee registry keyed by a caller-assigned, unique employee id.

use crate::error::{PayrollError, PayrollResult};
use crate::models::Employee;
use crate::search::search_employees;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{Connection, params};
use tracing::{info, warn};

#[derive(Debug, Default, Clone)]
pub struct EmployeeRegistry {
    employees: Vec<Employee>,
}

fn check_date(field: &str, value: &str) -> PayrollResult<()> {
    if value.trim().is_empty() {
        return Ok(());
    }
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| PayrollError::InvalidField {
            field: field.to_string(),
            message: format!("'{}' is not a YYYY-MM-DD date", value),
        })
}

fn normalize(mut e: Employee) -> PayrollResult<Employee> {
    e.id = e.id.trim().to_string();
    if e.id.is_empty() {
        return Err(PayrollError::MissingField { field: "empId" });
    }
    e.name = e.name.trim().to_string();
    check_date("doj", &e.doj)?;
    check_date("dob", &e.dob)?;
    Ok(e)
}

impl EmployeeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &[Employee] {
        &self.employees
    }

    pub fn get(&self, id: &str) -> Option<&Employee> {
        let id = id.trim();
        self.employees.iter().find(|e| e.id.eq_ignore_ascii_case(id))
    }

    pub fn add(&mut self, employee: Employee) -> PayrollResult<()> {
        let e = normalize(employee)?;
        if self.get(&e.id).is_some() {
            return Err(PayrollError::DuplicateEmployee { id: e.id });
        }
        info!(id = %e.id, "employee added");
        self.employees.push(e);
        Ok(())
    }

    pub fn update(&mut self, employee: Employee) -> PayrollResult<()> {
        let e = normalize(employee)?;
        let slot = self
            .employees
            .iter_mut()
            .find(|x| x.id.eq_ignore_ascii_case(&e.id))
            .ok_or_else(|| PayrollError::NotFound { id: e.id.clone() })?;
        *slot = e;
        Ok(())
    }

    /// Add or replace; used when syncing from the remote feed.
    pub fn upsert(&mut self, employee: Employee) -> PayrollResult<()> {
        let e = normalize(employee)?;
        if self.get(&e.id).is_some() {
            self.update(e)
        } else {
            self.add(e)
        }
    }

    /// Upsert every fetched employee, skipping rows that fail validation.
    /// Returns how many were applied.
    pub fn sync(&mut self, employees: Vec<Employee>) -> usize {
        let mut applied = 0;
        for e in employees {
            let id = e.id.clone();
            match self.upsert(e) {
                Ok(()) => applied += 1,
                Err(err) => warn!(id = %id, error = %err, "skipping fetched employee"),
            }
        }
        applied
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.employees.len();
        let id = id.trim();
        self.employees.retain(|e| !e.id.eq_ignore_ascii_case(id));
        self.employees.len() != before
    }

    pub fn search(&self, term: &str) -> Vec<&Employee> {
        search_employees(&self.employees, term).collect()
    }

    pub fn load(conn: &Connection) -> Result<Self> {
        let mut stmt = conn.prepare("SELECT emp_id, data FROM employees ORDER BY position")?;
        let rows = stmt.query_map([], |r| Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?)))?;
        let mut employees = Vec::new();
        for row in rows {
            let (id, data) = row?;
            let e: Employee = serde_json::from_str(&data)
                .with_context(|| format!("Invalid stored employee '{}'", id))?;
            employees.push(e);
        }
        Ok(Self { employees })
    }

    pub fn flush(&self, conn: &Connection) -> Result<()> {
        let tx = conn.unchecked_transaction()?;
        tx.execute("DELETE FROM employees", [])?;
        for (pos, e) in self.employees.iter().enumerate() {
            tx.execute(
                "INSERT INTO employees(emp_id, position, data) VALUES (?1,?2,?3)",
                params![e.id, pos as i64, serde_json::to_string(e)?],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}
