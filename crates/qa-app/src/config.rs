use std::path::PathBuf;

use anyhow::{Result, bail};
use qa_db::DbConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db: DbConfig,
    /// Seed demo rows when the store has no users yet.
    pub seed: bool,
    pub report_format: ReportFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = DbConfig::default();

        let path = lookup("QA_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.path);
        let foreign_keys = match lookup("QA_FOREIGN_KEYS") {
            Some(value) => parse_flag("QA_FOREIGN_KEYS", &value)?,
            None => defaults.foreign_keys,
        };
        let seed = match lookup("QA_SEED") {
            Some(value) => parse_flag("QA_SEED", &value)?,
            None => false,
        };
        let report_format = match lookup("QA_REPORT_FORMAT").as_deref() {
            None | Some("text") => ReportFormat::Text,
            Some("json") => ReportFormat::Json,
            Some(other) => bail!("QA_REPORT_FORMAT must be text or json, got {:?}", other),
        };

        Ok(Self {
            db: DbConfig { path, foreign_keys },
            seed,
            report_format,
        })
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => bail!("{} must be a boolean, got {:?}", key, value),
    }
}
