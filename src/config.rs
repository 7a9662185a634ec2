// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "http://localhost:5000";
pub const DEFAULT_SLIPS_DIR: &str = "mock_slips";

/// What a feed fetch returns when the remote side cannot be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchFailurePolicy {
    #[default]
    Error,
    Fallback,
    Empty,
}

impl FromStr for FetchFailurePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "fallback" => Ok(Self::Fallback),
            "empty" => Ok(Self::Empty),
            other => Err(anyhow!(
                "Unknown fetch failure policy '{}' (use error|fallback|empty)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub on_fetch_failure: FetchFailurePolicy,
    pub fetch_timeout: Duration,
    pub fetch_retries: u32,
    pub log_level: tracing::Level,
    pub db_path: Option<PathBuf>,
    /// Local payslip documents served when a download fails under `fallback`.
    pub slips_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            on_fetch_failure: FetchFailurePolicy::Error,
            fetch_timeout: Duration::from_secs(15),
            fetch_retries: 0,
            log_level: tracing::Level::WARN,
            db_path: None,
            slips_dir: PathBuf::from(DEFAULT_SLIPS_DIR),
        }
    }
}

impl Config {
    /// Read the process environment, after loading `.env` if one exists.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut cfg = Config::default();

        if let Some(v) = get("API_BASE_URL") {
            cfg.api_base = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = get("ON_FETCH_FAILURE") {
            cfg.on_fetch_failure = v.parse().context("ON_FETCH_FAILURE")?;
        }
        if let Some(v) = get("FETCH_TIMEOUT_SECS") {
            let secs: u64 = v
                .parse()
                .with_context(|| format!("Invalid FETCH_TIMEOUT_SECS '{}'", v))?;
            cfg.fetch_timeout = Duration::from_secs(secs);
        }
        if let Some(v) = get("FETCH_RETRIES") {
            cfg.fetch_retries = v
                .parse()
                .with_context(|| format!("Invalid FETCH_RETRIES '{}'", v))?;
        }
        if let Some(v) = get("PAYCLIP_LOG") {
            cfg.log_level = v
                .parse()
                .map_err(|_| anyhow!("Invalid PAYCLIP_LOG '{}' (use error|warn|info|debug|trace)", v))?;
        }
        cfg.db_path = get("PAYCLIP_DB").map(PathBuf::from);
        if let Some(v) = get("MOCK_SLIPS_DIR") {
            cfg.slips_dir = PathBuf::from(v);
        }
        Ok(cfg)
    }
}
