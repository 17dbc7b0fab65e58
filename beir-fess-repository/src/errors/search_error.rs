//! Search error types.
//!
//! Admin operations (reset, bulk upload) fail hard with `RemoteOperation`.
//! Query-time HTTP failures never reach this type; they degrade to empty
//! results inside the backend.

use thiserror::Error;

/// Errors that can occur while talking to the search server.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The request could not be sent or the response could not be read.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The server did not report success for an admin operation.
    #[error("{operation} failed, response: {response}")]
    RemoteOperation {
        /// Which operation was rejected.
        operation: String,
        /// Raw response body as returned by the server.
        response: String,
    },

    /// A successful query response could not be decoded.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The adapter configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SearchError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a remote operation error carrying the raw response.
    pub fn remote_operation(operation: impl Into<String>, response: impl Into<String>) -> Self {
        Self::RemoteOperation {
            operation: operation.into(),
            response: response.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        Self::connection(err.to_string())
    }
}
