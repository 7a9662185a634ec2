// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Client for the remote HR service.
//!
//! Paths: `GET /api/employees`, `GET /api/payroll` and
//! `GET /api/payroll/download/{filename}`. What happens when the service is
//! unreachable is decided by [`FetchFailurePolicy`].

use crate::config::{Config, FetchFailurePolicy};
use crate::error::{PayrollError, PayrollResult};
use crate::models::{Employee, PayrollSlipEntry};
use crate::search::group_by_employee;
use crate::utils::http_client;
use anyhow::Result;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use tracing::{debug, info, warn};

static FALLBACK_PAYROLL: Lazy<Vec<PayrollSlipEntry>> = Lazy::new(|| {
    let entry = |id: &str, name: &str, role: &str, salary: i64, doj: &str, month: &str, slip: &str| {
        PayrollSlipEntry {
            employee_id: id.into(),
            name: name.into(),
            role: role.into(),
            salary: Decimal::from(salary),
            doj: doj.into(),
            month: month.into(),
            slip_reference: slip.into(),
        }
    };
    vec![
        entry("E001", "Alice Johnson", "Frontend Developer", 7500, "2022-03-15", "April 2025", "alice_april_2025.pdf"),
        entry("E001", "Alice Johnson", "Frontend Developer", 7500, "2022-03-15", "March 2025", "alice_march_2025.pdf"),
        entry("E002", "Bob Singh", "Backend Developer", 8200, "2021-06-10", "April 2025", "bob_april_2025.pdf"),
        entry("E003", "Carol Danvers", "DevOps Engineer", 9000, "2023-01-20", "April 2025", "carol_april_2025.pdf"),
    ]
});

/// Static stand-in for `/api/payroll`.
pub fn fallback_payroll() -> Vec<PayrollSlipEntry> {
    FALLBACK_PAYROLL.clone()
}

/// One employee per distinct id of the fallback payroll feed.
pub fn fallback_employees() -> Vec<Employee> {
    group_by_employee(FALLBACK_PAYROLL.iter())
        .into_iter()
        .filter_map(|g| {
            g.card().map(|c| Employee {
                id: c.employee_id.clone(),
                name: c.name.clone(),
                designation: c.role.clone(),
                doj: c.doj.clone(),
                ..Employee::default()
            })
        })
        .collect()
}

pub struct FeedClient {
    base: String,
    policy: FetchFailurePolicy,
    retries: u32,
    slips_dir: PathBuf,
    client: reqwest::blocking::Client,
}

impl FeedClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        Ok(Self {
            base: cfg.api_base.trim_end_matches('/').to_string(),
            policy: cfg.on_fetch_failure,
            retries: cfg.fetch_retries,
            slips_dir: cfg.slips_dir.clone(),
            client: http_client(cfg.fetch_timeout)?,
        })
    }

    pub fn policy(&self) -> FetchFailurePolicy {
        self.policy
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn get_bytes(&self, url: &str) -> PayrollResult<Vec<u8>> {
        let mut last = String::new();
        for attempt in 0..=self.retries {
            let res = self
                .client
                .get(url)
                .send()
                .and_then(|r| r.error_for_status())
                .and_then(|r| r.bytes());
            match res {
                Ok(b) => return Ok(b.to_vec()),
                Err(e) => {
                    debug!(%url, attempt, error = %e, "fetch attempt failed");
                    last = e.to_string();
                }
            }
        }
        Err(PayrollError::NetworkFetch {
            url: url.to_string(),
            message: last,
        })
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> PayrollResult<T> {
        let url = self.url(path);
        let body = self.get_bytes(&url)?;
        serde_json::from_slice(&body).map_err(|e| PayrollError::NetworkFetch {
            url,
            message: format!("invalid JSON: {}", e),
        })
    }

    fn recover<T>(
        &self,
        res: PayrollResult<Vec<T>>,
        fallback: impl FnOnce() -> Vec<T>,
    ) -> PayrollResult<Vec<T>> {
        match (res, self.policy) {
            (Ok(v), _) => Ok(v),
            (Err(e), FetchFailurePolicy::Error) => Err(e),
            (Err(e), FetchFailurePolicy::Empty) => {
                warn!(error = %e, "feed unavailable, continuing with no data");
                Ok(Vec::new())
            }
            (Err(e), FetchFailurePolicy::Fallback) => {
                warn!(error = %e, "feed unavailable, using fallback data");
                Ok(fallback())
            }
        }
    }

    pub fn fetch_employees(&self) -> PayrollResult<Vec<Employee>> {
        let res = self.get_json::<Vec<Employee>>("/api/employees");
        if let Ok(v) = &res {
            info!(count = v.len(), "employees fetched");
        }
        self.recover(res, fallback_employees)
    }

    pub fn fetch_payroll(&self) -> PayrollResult<Vec<PayrollSlipEntry>> {
        let res = self.get_json::<Vec<PayrollSlipEntry>>("/api/payroll");
        if let Ok(v) = &res {
            info!(count = v.len(), "payroll feed fetched");
        }
        self.recover(res, fallback_payroll)
    }

    /// Raw bytes of a payslip document. Under the `fallback` policy a failed
    /// download is served from the local slips directory instead; the other
    /// policies have no stand-in for a document and fail.
    pub fn download_slip(&self, filename: &str) -> PayrollResult<Vec<u8>> {
        let name = filename.trim();
        if name.is_empty() {
            return Err(PayrollError::MissingField { field: "filename" });
        }
        if name.contains(['/', '\\']) || name.contains("..") {
            return Err(PayrollError::InvalidField {
                field: "filename".into(),
                message: format!("'{}' must be a bare file name", name),
            });
        }
        let url = self.url(&format!("/api/payroll/download/{}", name));
        match (self.get_bytes(&url), self.policy) {
            (Err(e), FetchFailurePolicy::Fallback) => {
                let local = self.slips_dir.join(name);
                match std::fs::read(&local) {
                    Ok(bytes) => {
                        warn!(error = %e, path = %local.display(), "download failed, using local slip");
                        Ok(bytes)
                    }
                    Err(io) => {
                        debug!(path = %local.display(), error = %io, "no local slip");
                        Err(e)
                    }
                }
            }
            (res, _) => res,
        }
    }
}
