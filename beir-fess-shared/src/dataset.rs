//! BEIR dataset I/O.
//!
//! Corpus and query files are JSON Lines with an `_id` field per record.
//! Retrieval output is written in the TREC run format expected by the usual
//! evaluation tools.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::errors::DatasetError;
use crate::types::{Corpus, CorpusDocument, Queries, SearchResults};

#[derive(Debug, Deserialize)]
struct CorpusRecord {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueryRecord {
    #[serde(rename = "_id")]
    id: String,
    text: String,
}

/// Decode every non-blank line of `reader` as `T`, passing it to `sink`.
fn read_jsonl<R, T, F>(reader: R, mut sink: F) -> Result<usize, DatasetError>
where
    R: BufRead,
    T: for<'de> Deserialize<'de>,
    F: FnMut(T),
{
    let mut count = 0;
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: T =
            serde_json::from_str(&line).map_err(|e| DatasetError::parse(idx + 1, e.to_string()))?;
        sink(record);
        count += 1;
    }
    Ok(count)
}

/// Read a corpus from a JSONL stream. A repeated id replaces the earlier entry.
pub fn read_corpus<R: BufRead>(reader: R) -> Result<Corpus, DatasetError> {
    let mut corpus = Corpus::new();
    let count = read_jsonl(reader, |record: CorpusRecord| {
        corpus.insert(
            record.id,
            CorpusDocument {
                title: record.title,
                text: record.text,
            },
        );
    })?;
    debug!(records = count, documents = corpus.len(), "Read corpus");
    Ok(corpus)
}

/// Read queries from a JSONL stream.
pub fn read_queries<R: BufRead>(reader: R) -> Result<Queries, DatasetError> {
    let mut queries = Queries::new();
    read_jsonl(reader, |record: QueryRecord| {
        queries.insert(record.id, record.text);
    })?;
    Ok(queries)
}

/// Load a `corpus.jsonl` file.
pub fn load_corpus(path: impl AsRef<Path>) -> Result<Corpus, DatasetError> {
    let path = path.as_ref();
    let corpus = read_corpus(BufReader::new(File::open(path)?))?;
    info!(path = %path.display(), documents = corpus.len(), "Loaded corpus");
    Ok(corpus)
}

/// Load a `queries.jsonl` file.
pub fn load_queries(path: impl AsRef<Path>) -> Result<Queries, DatasetError> {
    let path = path.as_ref();
    let queries = read_queries(BufReader::new(File::open(path)?))?;
    info!(path = %path.display(), queries = queries.len(), "Loaded queries");
    Ok(queries)
}

/// Write results as a TREC run: `qid Q0 docid rank score run_name`.
///
/// Documents are ranked by descending score, ties broken by document id.
/// Returns the number of lines written.
pub fn write_trec_run<W: Write>(
    results: &SearchResults,
    run_name: &str,
    mut writer: W,
) -> Result<usize, DatasetError> {
    let mut lines = 0;
    for (query_id, scores) in results {
        let mut ranked: Vec<(&String, &f64)> = scores.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0)));

        for (rank, (doc_id, score)) in ranked.into_iter().enumerate() {
            writeln!(
                writer,
                "{} Q0 {} {} {} {}",
                query_id,
                doc_id,
                rank + 1,
                score,
                run_name
            )?;
            lines += 1;
        }
    }
    writer.flush()?;
    Ok(lines)
}
