//! Environment-driven settings for the runner.

use std::env;
use std::time::Duration;

use tracing::info;

use crate::RunError;
use beir_fess_repository::config::{
    DEFAULT_BASE_URL, DEFAULT_BULK_SIZE, DEFAULT_LANGUAGE, DEFAULT_SETTLE_DELAY,
};
use beir_fess_repository::FessSearchConfig;

/// Default index name when none is configured.
const DEFAULT_INDEX_NAME: &str = "beir";

/// Resolved runner settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub index_name: String,
    pub access_token: Option<String>,
    pub language: String,
    pub initialize: bool,
    pub bulk_size: usize,
    pub settle_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            index_name: DEFAULT_INDEX_NAME.to_string(),
            access_token: None,
            language: DEFAULT_LANGUAGE.to_string(),
            initialize: true,
            bulk_size: DEFAULT_BULK_SIZE,
            settle_seconds: DEFAULT_SETTLE_DELAY.as_secs(),
        }
    }
}

impl Settings {
    /// Load settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `FESS_URL`: Fess server URL (default: http://localhost:8080)
    /// - `FESS_INDEX_NAME`: Name used in synthetic document URLs (default: beir)
    /// - `FESS_ACCESS_TOKEN`: Admin API token (default: none)
    /// - `FESS_LANGUAGE`: Document language tag (default: en)
    /// - `FESS_INITIALIZE`: Reset and index before searching (default: true)
    /// - `FESS_BULK_SIZE`: Documents per bulk upload (default: 100)
    /// - `FESS_SETTLE_SECONDS`: Wait after indexing (default: 2)
    pub fn from_env() -> Result<Self, RunError> {
        let settings = Self::from_lookup(|key| env::var(key).ok())?;
        info!(
            url = %settings.base_url,
            index = %settings.index_name,
            initialize = settings.initialize,
            "Loaded settings"
        );
        Ok(settings)
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RunError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            base_url: var("FESS_URL").unwrap_or(defaults.base_url),
            index_name: var("FESS_INDEX_NAME").unwrap_or(defaults.index_name),
            access_token: var("FESS_ACCESS_TOKEN"),
            language: var("FESS_LANGUAGE").unwrap_or(defaults.language),
            initialize: match var("FESS_INITIALIZE") {
                Some(value) => parse_bool("FESS_INITIALIZE", &value)?,
                None => defaults.initialize,
            },
            bulk_size: match var("FESS_BULK_SIZE") {
                Some(value) => parse_number("FESS_BULK_SIZE", &value)?,
                None => defaults.bulk_size,
            },
            settle_seconds: match var("FESS_SETTLE_SECONDS") {
                Some(value) => parse_number("FESS_SETTLE_SECONDS", &value)?,
                None => defaults.settle_seconds,
            },
        })
    }

    /// Build the adapter configuration.
    pub fn to_search_config(&self) -> FessSearchConfig {
        let config = FessSearchConfig::new(&self.index_name)
            .with_base_url(&self.base_url)
            .with_language(&self.language)
            .with_initialize(self.initialize)
            .with_bulk_size(self.bulk_size)
            .with_settle_delay(Duration::from_secs(self.settle_seconds));

        match &self.access_token {
            Some(token) => config.with_access_token(token),
            None => config,
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, RunError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(RunError::config(format!(
            "{} must be a boolean, got {}",
            key, other
        ))),
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, RunError> {
    value.trim().parse().map_err(|_| {
        RunError::config(format!(
            "{} must be a non-negative integer, got {}",
            key, value
        ))
    })
}
