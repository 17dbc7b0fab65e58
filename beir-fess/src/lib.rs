//! # BEIR Fess
//!
//! Runner for BEIR retrieval evaluations against a Fess server.
//!
//! This crate wires environment configuration, command-line overrides,
//! logging and terminal progress into the `FessSearch` adapter for the
//! `beir-fess` binary.

pub mod cli;
pub mod config;
pub mod logging;
pub mod progress;

pub use config::Settings;
pub use progress::IndicatifProgress;

use thiserror::Error;

/// Errors that can occur while running an evaluation command.
#[derive(Error, Debug)]
pub enum RunError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Search server error.
    #[error("Search error: {0}")]
    Search(#[from] beir_fess_repository::SearchError),

    /// Dataset file error.
    #[error("Dataset error: {0}")]
    Dataset(#[from] beir_fess_shared::DatasetError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl RunError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
