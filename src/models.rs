// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Stable identity of a processed salary record, assigned at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryComponents {
    pub basic: Decimal,
    pub bonus: Decimal,
    pub pf: Decimal,
    pub professional_tax: Decimal,
    pub tds: Decimal,
    pub worked_days: u32,
    pub lop_days: u32,
}

/// Form values exactly as the caller collected them. Anything may be blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawSalaryFields {
    pub employee_key: String,
    pub month: String,
    pub worked_days: String,
    pub lop_days: String,
    pub basic: String,
    pub bonus: String,
    pub pf: String,
    pub professional_tax: String,
    pub tds: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedFields {
    pub employee_key: String,
    pub month: String,
    pub components: SalaryComponents,
}

impl ValidatedFields {
    /// Turn a validated draft back into form values, e.g. to pre-populate an edit.
    pub fn to_raw(&self) -> RawSalaryFields {
        let c = &self.components;
        RawSalaryFields {
            employee_key: self.employee_key.clone(),
            month: self.month.clone(),
            worked_days: c.worked_days.to_string(),
            lop_days: c.lop_days.to_string(),
            basic: c.basic.to_string(),
            bonus: c.bonus.to_string(),
            pf: c.pf.to_string(),
            professional_tax: c.professional_tax.to_string(),
            tds: c.tds.to_string(),
        }
    }
}

/// One payroll run for one employee for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedSalaryRecord {
    pub id: RecordId,
    pub employee_key: String, // email or employee ID
    pub month: String,        // ISO date or label
    pub components: SalaryComponents,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProcessedSalaryRecord {
    pub fn fields(&self) -> ValidatedFields {
        ValidatedFields {
            employee_key: self.employee_key.clone(),
            month: self.month.clone(),
            components: self.components.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Employee {
    #[serde(rename = "empId", alias = "employeeId")]
    pub id: String,
    #[serde(rename = "empName", alias = "name")]
    pub name: String,
    pub designation: String,
    pub doj: String,
    pub location: String,
    pub pan: String,
    pub uan: String,
    #[serde(rename = "bankAccount")]
    pub bank_account: String,
    pub aadhar: String,
    pub dob: String,
    pub email: String,
    #[serde(rename = "primarycontact")]
    pub primary_contact: String,
    #[serde(rename = "maritalstatus")]
    pub marital_status: String,
    #[serde(rename = "spousesname")]
    pub spouse_name: String,
    #[serde(rename = "emergencycontactname")]
    pub emergency_contact_name: String,
    #[serde(rename = "permanentaddress")]
    pub permanent_address: String,
    #[serde(rename = "presentaddress")]
    pub present_address: String,
    #[serde(rename = "ifsccode")]
    pub ifsc_code: String,
}

/// A row of the remote payroll feed. Only the employee id is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollSlipEntry {
    pub employee_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub salary: Decimal,
    #[serde(default)]
    pub doj: String,
    #[serde(default)]
    pub month: String,
    #[serde(default, rename = "slip")]
    pub slip_reference: String,
}
