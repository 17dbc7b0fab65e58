//! Command-line overrides layered on top of environment settings.

use std::path::PathBuf;

use clap::Args;

use crate::{RunError, Settings};

/// Command-line values that take precedence over `FESS_*` variables.
#[derive(Args, Debug, Default)]
pub struct Overrides {
    /// Fess server URL
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Name used in synthetic document URLs
    #[arg(long, global = true)]
    pub index_name: Option<String>,

    /// Admin API access token
    #[arg(long, global = true)]
    pub access_token: Option<String>,

    /// Language tag for uploaded documents
    #[arg(long, global = true)]
    pub language: Option<String>,

    /// Documents per bulk upload
    #[arg(long, global = true)]
    pub bulk_size: Option<usize>,

    /// Seconds to wait between indexing and querying
    #[arg(long, global = true)]
    pub settle_seconds: Option<u64>,

    /// Search an already indexed corpus without resetting it
    #[arg(long, global = true)]
    pub no_initialize: bool,

    /// Hide progress bars
    #[arg(long, global = true)]
    pub quiet: bool,
}

impl Overrides {
    /// Overwrite every setting given on the command line.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(url) = &self.url {
            settings.base_url = url.clone();
        }
        if let Some(index_name) = &self.index_name {
            settings.index_name = index_name.clone();
        }
        if let Some(access_token) = &self.access_token {
            settings.access_token = Some(access_token.clone());
        }
        if let Some(language) = &self.language {
            settings.language = language.clone();
        }
        if let Some(bulk_size) = self.bulk_size {
            settings.bulk_size = bulk_size;
        }
        if let Some(settle_seconds) = self.settle_seconds {
            settings.settle_seconds = settle_seconds;
        }
        if self.no_initialize {
            settings.initialize = false;
        }
    }
}

/// Resolve the corpus path for `search`.
///
/// Indexing happens before querying when `initialize` is set, so the corpus
/// is mandatory then. Otherwise it may be omitted.
pub fn search_corpus(
    corpus: Option<PathBuf>,
    settings: &Settings,
) -> Result<Option<PathBuf>, RunError> {
    match corpus {
        None if settings.initialize => Err(RunError::config(
            "--corpus is required unless --no-initialize is set",
        )),
        corpus => Ok(corpus),
    }
}
