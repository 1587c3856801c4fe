use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants;
use crate::error::{ProcessorError, Result};

/// Runtime settings for the ingestion pipeline.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Root directory of the local object store (one subdirectory per bucket)
    pub store_root: PathBuf,
    pub source_bucket: String,
    pub source_prefix: String,
    pub processed_prefix: String,
    pub knowledge_base_id: String,
    pub data_source_id: String,
    pub sync_delay_seconds: u64,
    /// NDJSON file that records every requested ingestion job
    pub jobs_log: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_root: PathBuf::from(constants::DEFAULT_STORE_ROOT),
            source_bucket: constants::DEFAULT_SOURCE_BUCKET.to_string(),
            source_prefix: constants::DEFAULT_SOURCE_PREFIX.to_string(),
            processed_prefix: constants::DEFAULT_PROCESSED_PREFIX.to_string(),
            knowledge_base_id: constants::DEFAULT_KNOWLEDGE_BASE_ID.to_string(),
            data_source_id: constants::DEFAULT_DATA_SOURCE_ID.to_string(),
            sync_delay_seconds: constants::DEFAULT_SYNC_DELAY_SECONDS,
            jobs_log: PathBuf::from(constants::DEFAULT_JOBS_LOG),
        }
    }
}

impl Config {
    /// Load settings from a TOML file; missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ProcessorError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Defaults overlaid with `.env` and process environment variables.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from a variable lookup. Unset variables leave the field as is.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("STORE_ROOT") {
            self.store_root = PathBuf::from(v);
        }
        if let Some(v) = lookup("SOURCE_BUCKET") {
            self.source_bucket = v;
        }
        if let Some(v) = lookup("SOURCE_PREFIX") {
            self.source_prefix = v;
        }
        if let Some(v) = lookup("PROCESSED_PREFIX") {
            self.processed_prefix = v;
        }
        if let Some(v) = lookup("KNOWLEDGE_BASE_ID") {
            self.knowledge_base_id = v;
        }
        if let Some(v) = lookup("DATA_SOURCE_ID") {
            self.data_source_id = v;
        }
        if let Some(v) = lookup("SYNC_DELAY_SECONDS") {
            self.sync_delay_seconds = v.trim().parse().map_err(|_| {
                ProcessorError::Config(format!("SYNC_DELAY_SECONDS must be a whole number, got '{}'", v))
            })?;
        }
        if let Some(v) = lookup("JOBS_LOG") {
            self.jobs_log = PathBuf::from(v);
        }
        Ok(self)
    }
}
