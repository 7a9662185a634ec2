// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The ledger of processed salary runs.
//!
//! Records are addressed by their [`RecordId`], never by position, so an edit
//! started before a delete still lands on the right record. Unknown ids are
//! a no-op for `begin_edit`, `save` and `delete`.

use crate::models::{ProcessedSalaryRecord, RecordId, ValidatedFields};
use crate::store::SalaryStore;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Debug, Default, Clone)]
pub struct Ledger {
    records: Vec<ProcessedSalaryRecord>,
    dirty: bool,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<S: SalaryStore + ?Sized>(store: &S) -> Result<Self> {
        let records = store.load()?;
        debug!(count = records.len(), "ledger loaded");
        Ok(Self {
            records,
            dirty: false,
        })
    }

    /// Write the ledger back if anything changed since load or the last flush.
    pub fn flush<S: SalaryStore + ?Sized>(&mut self, store: &mut S) -> Result<()> {
        if self.dirty {
            store.flush(&self.records)?;
            self.dirty = false;
            debug!(count = self.records.len(), "ledger flushed");
        }
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ProcessedSalaryRecord] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&ProcessedSalaryRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn create(&mut self, fields: ValidatedFields, now: DateTime<Utc>) -> ProcessedSalaryRecord {
        let record = ProcessedSalaryRecord {
            id: RecordId::new(),
            employee_key: fields.employee_key,
            month: fields.month,
            components: fields.components,
            created_at: now,
            updated_at: now,
        };
        info!(id = %record.id, employee = %record.employee_key, month = %record.month, "salary processed");
        self.records.push(record.clone());
        self.dirty = true;
        record
    }

    /// Fields of a persisted record, ready to be edited. The record stays in
    /// the ledger until [`Ledger::save`] is called.
    pub fn begin_edit(&self, id: RecordId) -> Option<ValidatedFields> {
        self.get(id).map(ProcessedSalaryRecord::fields)
    }

    /// Replace the record's fields, keeping its original `created_at`.
    pub fn save(
        &mut self,
        id: RecordId,
        fields: ValidatedFields,
        now: DateTime<Utc>,
    ) -> Option<ProcessedSalaryRecord> {
        let Some(rec) = self.records.iter_mut().find(|r| r.id == id) else {
            debug!(%id, "save ignored, record not found");
            return None;
        };
        rec.employee_key = fields.employee_key;
        rec.month = fields.month;
        rec.components = fields.components;
        rec.updated_at = now;
        self.dirty = true;
        info!(%id, "salary record updated");
        Some(rec.clone())
    }

    /// Returns whether a record was removed.
    pub fn delete(&mut self, id: RecordId) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        let removed = self.records.len() != before;
        if removed {
            self.dirty = true;
            info!(%id, "salary record deleted");
        } else {
            debug!(%id, "delete ignored, record not found");
        }
        removed
    }

    /// Case-insensitive substring match on employee key or month.
    /// A blank query matches every record.
    pub fn find<'a>(
        &'a self,
        query: &str,
    ) -> impl Iterator<Item = &'a ProcessedSalaryRecord> + use<'a> {
        let needle = query.trim().to_lowercase();
        self.records.iter().filter(move |r| {
            r.employee_key.to_lowercase().contains(&needle)
                || r.month.to_lowercase().contains(&needle)
        })
    }

    /// Runs sharing an (employee key, month) pair, in first-seen order.
    pub fn duplicate_runs(&self) -> Vec<(String, String, usize)> {
        let mut order: Vec<(String, String)> = Vec::new();
        let mut counts: HashMap<(String, String), usize> = HashMap::new();
        for r in &self.records {
            let key = (r.employee_key.to_lowercase(), r.month.to_lowercase());
            let n = counts.entry(key.clone()).or_insert(0);
            if *n == 0 {
                order.push(key);
            }
            *n += 1;
        }
        order
            .into_iter()
            .filter_map(|k| {
                let n = counts[&k];
                (n > 1).then_some((k.0, k.1, n))
            })
            .collect()
    }
}

impl From<Vec<ProcessedSalaryRecord>> for Ledger {
    fn from(records: Vec<ProcessedSalaryRecord>) -> Self {
        Self {
            records,
            dirty: false,
        }
    }
}
