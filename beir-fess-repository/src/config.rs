//! Configuration types for the FessSearch adapter.

use std::time::Duration;

use url::Url;

use crate::errors::SearchError;

/// Default Fess server URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Default language tag attached to uploaded documents.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default number of documents per bulk upload.
pub const DEFAULT_BULK_SIZE: usize = 100;

/// Default wait between indexing and querying.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(2);

/// Configuration for the FessSearch adapter.
#[derive(Debug, Clone)]
pub struct FessSearchConfig {
    /// Name used to derive document URLs; keeps datasets apart on one server.
    pub index_name: String,
    /// Base URL of the Fess server.
    pub base_url: String,
    /// Value sent verbatim in the `Authorization` header of admin calls.
    pub access_token: Option<String>,
    /// Language tag stored on every uploaded document.
    pub language: String,
    /// Clear the index on connect and upload the corpus before searching.
    /// Set to false when the corpus has already been indexed.
    pub initialize: bool,
    /// Maximum number of documents per bulk upload request.
    pub bulk_size: usize,
    /// How long to wait after indexing so the server can commit.
    pub settle_delay: Duration,
}

impl FessSearchConfig {
    /// Create a config for the given index name with default settings.
    pub fn new(index_name: impl Into<String>) -> Self {
        Self {
            index_name: index_name.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: None,
            language: DEFAULT_LANGUAGE.to_string(),
            initialize: true,
            bulk_size: DEFAULT_BULK_SIZE,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_initialize(mut self, initialize: bool) -> Self {
        self.initialize = initialize;
        self
    }

    pub fn with_bulk_size(mut self, bulk_size: usize) -> Self {
        self.bulk_size = bulk_size;
        self
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    /// Check that the configuration can drive an adapter.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.index_name.is_empty() {
            return Err(SearchError::invalid_config("index_name is required"));
        }
        if self.bulk_size == 0 {
            return Err(SearchError::invalid_config("bulk_size must be at least 1"));
        }
        Url::parse(&self.base_url).map_err(|e| {
            SearchError::invalid_config(format!("Invalid base_url {}: {}", self.base_url, e))
        })?;
        Ok(())
    }
}
