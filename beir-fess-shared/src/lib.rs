//! # BEIR Fess Shared
//!
//! Types shared between the retrieval adapter and the command-line runner:
//! the corpus, query and result mappings, plus readers and writers for the
//! BEIR dataset files.

pub mod dataset;
pub mod errors;
pub mod types;

pub use dataset::{load_corpus, load_queries, read_corpus, read_queries, write_trec_run};
pub use errors::DatasetError;
pub use types::{Corpus, CorpusDocument, Queries, ScoreMap, ScoredDocument, SearchResults};
