// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Payclip", "payclip"));

pub fn db_path(cfg: &Config) -> Result<PathBuf> {
    if let Some(p) = &cfg.db_path {
        if let Some(parent) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(parent).context("Failed to create database dir")?;
        }
        return Ok(p.clone());
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("payclip.sqlite"))
}

pub fn open_or_init(cfg: &Config) -> Result<Connection> {
    let path = db_path(cfg)?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS salary_runs(
        id TEXT PRIMARY KEY,
        position INTEGER NOT NULL,
        employee_key TEXT NOT NULL,
        month TEXT NOT NULL,
        worked_days INTEGER NOT NULL DEFAULT 0,
        lop_days INTEGER NOT NULL DEFAULT 0,
        basic TEXT NOT NULL DEFAULT '0',
        bonus TEXT NOT NULL DEFAULT '0',
        pf TEXT NOT NULL DEFAULT '0',
        professional_tax TEXT NOT NULL DEFAULT '0',
        tds TEXT NOT NULL DEFAULT '0',
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    -- (employee_key, month) is deliberately not UNIQUE; see `payclip doctor`
    CREATE INDEX IF NOT EXISTS idx_salary_runs_key_month ON salary_runs(employee_key, month);

    CREATE TABLE IF NOT EXISTS employees(
        emp_id TEXT PRIMARY KEY,
        position INTEGER NOT NULL,
        data TEXT NOT NULL
    );
    "#,
    )?;
    Ok(())
}
