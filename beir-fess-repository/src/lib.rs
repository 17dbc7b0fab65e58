//! # BEIR Fess Repository
//!
//! This crate lets a BEIR-style evaluation use a Fess server as its
//! retrieval backend. It provides the `FessSearch` adapter (reset, ingest,
//! search), the `SearchBackend` trait it drives, and a concrete HTTP
//! implementation of that trait for Fess.

pub mod client;
pub mod config;
pub mod errors;
pub mod fess;
pub mod interfaces;
pub mod types;

pub use client::FessSearch;
pub use config::FessSearchConfig;
pub use errors::SearchError;
pub use fess::FessClient;
pub use interfaces::{NoopProgress, ProgressReporter, SearchBackend, TracingProgress};
pub use types::RemoteDocument;
