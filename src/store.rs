// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Storage collaborators for the salary ledger.
//!
//! A store is created (`init`), read once into a [`Ledger`](crate::ledger::Ledger)
//! (`load`), and written back after the ledger was mutated (`flush`). The
//! ledger itself never touches storage.

use crate::models::{ProcessedSalaryRecord, RecordId, SalaryComponents};
use anyhow::{Context, Result};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

pub trait SalaryStore {
    fn load(&self) -> Result<Vec<ProcessedSalaryRecord>>;
    fn flush(&mut self, records: &[ProcessedSalaryRecord]) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: Vec<ProcessedSalaryRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<ProcessedSalaryRecord>) -> Self {
        Self { records }
    }
}

impl SalaryStore for MemoryStore {
    fn load(&self) -> Result<Vec<ProcessedSalaryRecord>> {
        Ok(self.records.clone())
    }

    fn flush(&mut self, records: &[ProcessedSalaryRecord]) -> Result<()> {
        self.records = records.to_vec();
        Ok(())
    }
}

/// Ledger persisted in the `salary_runs` table. Row order follows ledger order.
pub struct SqliteStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl SalaryStore for SqliteStore<'_> {
    fn load(&self) -> Result<Vec<ProcessedSalaryRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, employee_key, month, worked_days, lop_days, basic, bonus, pf,
                    professional_tax, tds, created_at, updated_at
             FROM salary_runs ORDER BY position",
        )?;
        let rows = stmt.query_map([], |r| {
            Ok((
                r.get::<_, String>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, u32>(3)?,
                r.get::<_, u32>(4)?,
                [
                    r.get::<_, String>(5)?,
                    r.get::<_, String>(6)?,
                    r.get::<_, String>(7)?,
                    r.get::<_, String>(8)?,
                    r.get::<_, String>(9)?,
                ],
                r.get::<_, chrono::DateTime<chrono::Utc>>(10)?,
                r.get::<_, chrono::DateTime<chrono::Utc>>(11)?,
            ))
        })?;

        let mut out = Vec::new();
        for row in rows {
            let (id, employee_key, month, worked_days, lop_days, amounts, created_at, updated_at) =
                row?;
            let id = id
                .parse::<RecordId>()
                .with_context(|| format!("Invalid record id '{}' in salary_runs", id))?;
            let [basic, bonus, pf, professional_tax, tds] = amounts.map(|s| {
                s.parse::<Decimal>()
                    .with_context(|| format!("Invalid amount '{}' for record {}", s, id))
            });
            out.push(ProcessedSalaryRecord {
                id,
                employee_key,
                month,
                components: SalaryComponents {
                    basic: basic?,
                    bonus: bonus?,
                    pf: pf?,
                    professional_tax: professional_tax?,
                    tds: tds?,
                    worked_days,
                    lop_days,
                },
                created_at,
                updated_at,
            });
        }
        Ok(out)
    }

    fn flush(&mut self, records: &[ProcessedSalaryRecord]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM salary_runs", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO salary_runs(id, position, employee_key, month, worked_days, lop_days,
                    basic, bonus, pf, professional_tax, tds, created_at, updated_at)
                 VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13)",
            )?;
            for (pos, rec) in records.iter().enumerate() {
                let c = &rec.components;
                stmt.execute(params![
                    rec.id.to_string(),
                    pos as i64,
                    rec.employee_key,
                    rec.month,
                    c.worked_days,
                    c.lop_days,
                    c.basic.to_string(),
                    c.bonus.to_string(),
                    c.pf.to_string(),
                    c.professional_tax.to_string(),
                    c.tds.to_string(),
                    rec.created_at,
                    rec.updated_at,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}
