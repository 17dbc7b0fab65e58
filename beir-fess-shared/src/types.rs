//! Corpus, query and result types.
//!
//! All mappings are `BTreeMap`s so that iteration order is stable within a
//! run. Batching during ingest and the order of issued queries both follow
//! that order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single corpus entry. Both fields are optional in BEIR datasets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusDocument {
    /// Document title, frequently empty.
    #[serde(default)]
    pub title: Option<String>,
    /// Document body text.
    #[serde(default)]
    pub text: Option<String>,
}

impl CorpusDocument {
    /// Create a document with both a title and a body.
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            text: Some(text.into()),
        }
    }

    /// Create a document that only has body text.
    pub fn untitled(text: impl Into<String>) -> Self {
        Self {
            title: None,
            text: Some(text.into()),
        }
    }
}

/// Document id to document.
pub type Corpus = BTreeMap<String, CorpusDocument>;

/// Query id to query text.
pub type Queries = BTreeMap<String, String>;

/// Document id to relevance score for a single query.
pub type ScoreMap = BTreeMap<String, f64>;

/// Query id to the score mapping retrieved for it.
pub type SearchResults = BTreeMap<String, ScoreMap>;

/// A candidate document returned by the search server for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    /// Corpus identifier recovered from the document URL.
    pub corpus_id: String,
    /// Relevance score assigned by the server.
    pub score: f64,
}

impl ScoredDocument {
    pub fn new(corpus_id: impl Into<String>, score: f64) -> Self {
        Self {
            corpus_id: corpus_id.into(),
            score,
        }
    }
}
