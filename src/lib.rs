// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod calculator;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod feed;
pub mod ledger;
pub mod models;
pub mod registry;
pub mod report;
pub mod search;
pub mod store;
pub mod utils;
pub mod validator;

pub use error::{PayrollError, PayrollResult};
