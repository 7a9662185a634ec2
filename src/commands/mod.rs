// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod doctor;
pub mod employees;
pub mod exporter;
pub mod importer;
pub mod payroll;
pub mod salaries;
pub mod salary_info;
