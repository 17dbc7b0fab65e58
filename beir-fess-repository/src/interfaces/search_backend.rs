//! Search backend trait definition.

use async_trait::async_trait;

use crate::errors::SearchError;
use crate::types::RemoteDocument;
use beir_fess_shared::ScoredDocument;

/// Abstracts the remote full-text search server.
///
/// Implementations are injected into `FessSearch`. The adapter owns batching,
/// title substitution and query-id filtering; a backend only performs single
/// round trips.
///
/// # Error Handling
///
/// Admin calls (`delete_all`, `bulk_upload`) return
/// `SearchError::RemoteOperation` when the server reports a non-zero status.
/// `fetch_documents` returns an empty list for a non-200 response instead of
/// an error.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Delete every document in the index.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the server reported status 0
    /// * `Err(SearchError::RemoteOperation)` - Otherwise, with the raw response
    async fn delete_all(&self) -> Result<(), SearchError>;

    /// Upload one batch of documents in a single request.
    ///
    /// # Arguments
    ///
    /// * `documents` - The batch to upload, already in wire form
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the server reported status 0
    /// * `Err(SearchError::RemoteOperation)` - Otherwise, with the raw response
    async fn bulk_upload(&self, documents: &[RemoteDocument]) -> Result<(), SearchError>;

    /// Fetch up to `size` scored candidates for `query`.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ScoredDocument>)` - Candidates in server order; empty when the
    ///   server answered with anything other than HTTP 200
    /// * `Err(SearchError)` - If the request could not be sent or a 200 body
    ///   could not be decoded
    async fn fetch_documents(
        &self,
        query: &str,
        size: usize,
    ) -> Result<Vec<ScoredDocument>, SearchError>;
}
