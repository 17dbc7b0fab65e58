//! Interface definitions for the retrieval adapter.
//!
//! `SearchBackend` abstracts the remote search server so the adapter can be
//! driven by the Fess HTTP client or by a mock. `ProgressReporter` carries
//! upload and query progress out of the adapter without tying it to a
//! particular display.

mod progress;
mod search_backend;

pub use progress::{NoopProgress, ProgressReporter, TracingProgress};
pub use search_backend::SearchBackend;
