//! Fess implementation of the search backend.
//!
//! This module provides a concrete implementation of `SearchBackend`
//! that talks to the Fess admin and search JSON APIs over HTTP.

mod client;

pub use client::FessClient;
