// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Typed errors raised by the payroll engine.
//!
//! Numeric parse failures never show up here: they coerce to zero in the
//! validator. Deleting or editing an unknown record is a no-op in the ledger,
//! so `NotFound` is only raised by callers that need a record to continue
//! (for example rendering a payslip).

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayrollError {
    /// A required identity field was blank.
    #[error("Missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("Invalid value for '{field}': {message}")]
    InvalidField { field: String, message: String },

    #[error("Employee '{id}' already exists")]
    DuplicateEmployee { id: String },

    /// Earnings or deductions too large to total.
    #[error("Salary amounts are too large to compute net pay")]
    AmountOverflow,

    #[error("No record found for '{id}'")]
    NotFound { id: String },

    /// The remote feed could not be reached or returned garbage.
    #[error("Failed to fetch {url}: {message}")]
    NetworkFetch { url: String, message: String },
}

pub type PayrollResult<T> = Result<T, PayrollError>;
