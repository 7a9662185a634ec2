// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{PayrollError, PayrollResult};
use crate::models::SalaryComponents;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Annual-to-monthly factor used by the salary info sheet (≈ 1/12).
pub const MONTHLY_FACTOR: Decimal = Decimal::from_parts(833_333, 0, 0, false, 7);

/// Earnings minus deductions, half-up to two places. May be negative.
pub fn net_pay(c: &SalaryComponents) -> PayrollResult<Decimal> {
    let earnings = c.basic.checked_add(c.bonus);
    let deductions = c
        .pf
        .checked_add(c.professional_tax)
        .and_then(|d| d.checked_add(c.tds));
    earnings
        .zip(deductions)
        .and_then(|(e, d)| e.checked_sub(d))
        .map(|n| n.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .ok_or(PayrollError::AmountOverflow)
}

/// Annual/CTC figures for one employee as entered on the salary info sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryInfo {
    pub employee_id: String,
    pub monthly: bool,
    pub components: BTreeMap<String, Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBreakdown {
    pub employee_id: String,
    pub components: BTreeMap<String, Decimal>,
}

/// Scale every component by [`MONTHLY_FACTOR`] and round to the nearest
/// whole unit, halves rounding up. The employee id is carried through as is.
pub fn monthly_breakdown(info: &SalaryInfo) -> MonthlyBreakdown {
    let half = Decimal::new(5, 1);
    let components = info
        .components
        .iter()
        .map(|(k, v)| (k.clone(), (*v * MONTHLY_FACTOR + half).floor()))
        .collect();
    MonthlyBreakdown {
        employee_id: info.employee_id.clone(),
        components,
    }
}
