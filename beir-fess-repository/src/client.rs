//! Retrieval adapter implementation.
//!
//! `FessSearch` is what an evaluation harness talks to. It turns a corpus into
//! bulk uploads, waits for the server to settle, and collects per-query score
//! mappings. The actual round trips go through a `SearchBackend`.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::config::FessSearchConfig;
use crate::errors::SearchError;
use crate::fess::FessClient;
use crate::interfaces::{NoopProgress, ProgressReporter, SearchBackend};
use crate::types::RemoteDocument;
use beir_fess_shared::{Corpus, Queries, ScoreMap, ScoredDocument, SearchResults};

/// Retrieval adapter backed by a full-text search server.
///
/// Admin operations fail hard on the first rejected request. Query failures
/// reported through a non-200 status degrade to an empty score mapping for
/// that query only.
pub struct FessSearch {
    backend: Box<dyn SearchBackend>,
    config: FessSearchConfig,
    progress: Arc<dyn ProgressReporter>,
}

impl FessSearch {
    /// Create an adapter over an existing backend. Performs no I/O.
    pub fn new(
        backend: Box<dyn SearchBackend>,
        config: FessSearchConfig,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            backend,
            config,
            progress: Arc::new(NoopProgress),
        })
    }

    /// Connect to the Fess server named in `config`.
    ///
    /// When `config.initialize` is set the remote index is cleared before the
    /// adapter is returned.
    pub async fn connect(config: FessSearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let backend = FessClient::new(&config.base_url, config.access_token.clone())?;
        let adapter = Self::new(Box::new(backend), config)?;

        if adapter.config.initialize {
            adapter.reset().await?;
        }
        Ok(adapter)
    }

    /// Report ingest and query progress to `progress`.
    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &FessSearchConfig {
        &self.config
    }

    /// Delete every document in the remote index.
    #[instrument(skip(self), fields(index = %self.config.index_name))]
    pub async fn reset(&self) -> Result<(), SearchError> {
        self.backend.delete_all().await
    }

    /// Upload `corpus` in batches of `bulk_size`, in corpus order.
    ///
    /// Stops at the first rejected batch; later batches are never sent.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of documents uploaded
    /// * `Err(SearchError::RemoteOperation)` - If any batch was rejected
    #[instrument(skip(self, corpus), fields(index = %self.config.index_name, documents = corpus.len()))]
    pub async fn ingest(&self, corpus: &Corpus) -> Result<usize, SearchError> {
        let bulk_size = self.config.bulk_size;
        self.progress.start("docs", corpus.len() as u64);

        let mut uploaded = 0;
        let mut batch: Vec<RemoteDocument> = Vec::with_capacity(bulk_size);
        for (doc_id, document) in corpus {
            batch.push(RemoteDocument::from_corpus(
                &self.config.index_name,
                doc_id,
                document,
                &self.config.language,
            ));
            if batch.len() >= bulk_size {
                uploaded += self.send_batch(&batch).await?;
                batch.clear();
            }
        }
        if !batch.is_empty() {
            uploaded += self.send_batch(&batch).await?;
        }

        self.progress.finish();
        info!(uploaded = uploaded, "Indexed corpus");
        Ok(uploaded)
    }

    async fn send_batch(&self, batch: &[RemoteDocument]) -> Result<usize, SearchError> {
        self.backend.bulk_upload(batch).await?;
        self.progress.advance(batch.len() as u64);
        Ok(batch.len())
    }

    /// Retrieve up to `top_k` scored documents for every query.
    ///
    /// When the adapter is initializing, `corpus` is ingested first and the
    /// settle delay is awaited. Every query id gets an entry in the returned
    /// mapping, empty if the server returned nothing usable.
    #[instrument(skip(self, corpus, queries), fields(queries = queries.len()))]
    pub async fn search(
        &self,
        corpus: &Corpus,
        queries: &Queries,
        top_k: usize,
    ) -> Result<SearchResults, SearchError> {
        if self.config.initialize {
            self.ingest(corpus).await?;
            self.settle().await;
        }

        let mut results = SearchResults::new();
        self.progress.start("queries", queries.len() as u64);
        for (query_id, query) in queries {
            // One extra slot in case the query itself is indexed as a document.
            let candidates = self.fetch_documents(query, top_k.saturating_add(1)).await?;
            results.insert(query_id.clone(), score_map(query_id, candidates));
            self.progress.advance(1);
        }
        self.progress.finish();

        info!(queries = results.len(), "Search finished");
        Ok(results)
    }

    /// Issue a single query for `size` candidates.
    pub async fn fetch_documents(
        &self,
        query: &str,
        size: usize,
    ) -> Result<Vec<ScoredDocument>, SearchError> {
        self.backend.fetch_documents(query, size).await
    }

    async fn settle(&self) {
        let delay = self.config.settle_delay;
        if delay.is_zero() {
            return;
        }
        debug!(delay_ms = delay.as_millis() as u64, "Waiting for indexer to settle");
        tokio::time::sleep(delay).await;
    }
}

/// Build the score mapping for one query, dropping the query's own id.
fn score_map(query_id: &str, candidates: Vec<ScoredDocument>) -> ScoreMap {
    candidates
        .into_iter()
        .filter(|doc| doc.corpus_id != query_id)
        .map(|doc| (doc.corpus_id, doc.score))
        .collect()
}
