// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Turns raw form input into typed salary fields.
//!
//! Numerics are lenient: a blank or unparseable amount becomes zero and a
//! value with trailing junk keeps its leading number (`"12abc"` is 12). Only
//! blank identity fields, or amounts too large to total, fail validation.

use crate::calculator::net_pay;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{RawSalaryFields, SalaryComponents, ValidatedFields};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("leading number pattern")
});

pub fn validate(raw: &RawSalaryFields) -> PayrollResult<ValidatedFields> {
    let employee_key = raw.employee_key.trim();
    if employee_key.is_empty() {
        return Err(PayrollError::MissingField {
            field: "employeeKey",
        });
    }
    let month = raw.month.trim();
    if month.is_empty() {
        return Err(PayrollError::MissingField { field: "month" });
    }

    let components = SalaryComponents {
        basic: lenient_decimal(&raw.basic),
        bonus: lenient_decimal(&raw.bonus),
        pf: lenient_decimal(&raw.pf),
        professional_tax: lenient_decimal(&raw.professional_tax),
        tds: lenient_decimal(&raw.tds),
        worked_days: lenient_days(&raw.worked_days),
        lop_days: lenient_days(&raw.lop_days),
    };
    // Every persisted record must have a computable net pay
    net_pay(&components)?;

    Ok(ValidatedFields {
        employee_key: employee_key.to_string(),
        month: month.to_string(),
        components,
    })
}

/// Parse the leading number of `s`, or zero when there is none.
pub fn lenient_decimal(s: &str) -> Decimal {
    let Some(m) = LEADING_NUMBER.find(s.trim()) else {
        return Decimal::ZERO;
    };
    let lit = m.as_str().trim_start_matches('+');
    let parsed = if lit.contains(['e', 'E']) {
        Decimal::from_scientific(lit)
    } else {
        lit.trim_end_matches('.').parse::<Decimal>()
    };
    parsed.unwrap_or(Decimal::ZERO)
}

/// Whole, non-negative day count.
pub fn lenient_days(s: &str) -> u32 {
    let d = lenient_decimal(s);
    if d.is_sign_negative() {
        return 0;
    }
    d.trunc().to_u32().unwrap_or(0)
}
