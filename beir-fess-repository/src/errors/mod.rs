//! Error types for the BEIR Fess repository.

mod search_error;

pub use search_error::SearchError;
