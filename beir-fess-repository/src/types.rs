//! Wire types sent to the search server.

use serde::{Deserialize, Serialize};

use beir_fess_shared::CorpusDocument;

/// Host used to build synthetic document URLs.
pub const DOCUMENT_HOST: &str = "beir.codelibs.org";

/// Title stored when a corpus entry has none; Fess rejects empty titles.
pub const EMPTY_TITLE_PLACEHOLDER: &str = "-";

/// Fixed date used for every date field of an uploaded document.
pub const EPOCH_TIMESTAMP: &str = "1970-01-01T00:00:00.000Z";

/// Role granting anonymous users read access to a document.
pub const GUEST_ROLE: &str = "Rguest";

/// A document in the shape the Fess bulk API expects.
///
/// Only `title`, `content` and the URL-derived fields vary between documents.
/// The URL ends in the corpus id so search hits can be mapped back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteDocument {
    pub lang: String,
    pub title: String,
    pub content: String,
    pub content_length: String,
    pub url: String,
    pub host: String,
    pub site: String,
    pub filename: String,
    pub mimetype: String,
    pub filetype: String,
    pub click_count: u64,
    pub favorite_count: u64,
    pub boost: f64,
    pub last_modified: String,
    pub timestamp: String,
    pub created: String,
    pub role: Vec<String>,
}

impl RemoteDocument {
    /// Build the wire record for one corpus entry.
    ///
    /// # Arguments
    ///
    /// * `index_name` - Dataset name, embedded in the URL and site
    /// * `doc_id` - Corpus identifier, the last URL segment
    /// * `document` - The corpus entry
    /// * `language` - Language tag for the server's analyzers
    pub fn from_corpus(
        index_name: &str,
        doc_id: &str,
        document: &CorpusDocument,
        language: &str,
    ) -> Self {
        let title = match document.title.as_deref() {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => EMPTY_TITLE_PLACEHOLDER.to_string(),
        };
        let content = document.text.clone().unwrap_or_default();
        let site = format!("{}/{}/{}", DOCUMENT_HOST, index_name, doc_id);

        Self {
            lang: language.to_string(),
            title,
            content_length: content.chars().count().to_string(),
            content,
            url: format!("http://{}", site),
            host: DOCUMENT_HOST.to_string(),
            site,
            filename: format!("{}.html", doc_id),
            mimetype: "text/plain".to_string(),
            filetype: "text".to_string(),
            click_count: 0,
            favorite_count: 0,
            boost: 1.0,
            last_modified: EPOCH_TIMESTAMP.to_string(),
            timestamp: EPOCH_TIMESTAMP.to_string(),
            created: EPOCH_TIMESTAMP.to_string(),
            role: vec![GUEST_ROLE.to_string()],
        }
    }

    /// Corpus id this document was built from.
    pub fn corpus_id(&self) -> &str {
        corpus_id_from_url(&self.url)
    }
}

/// Recover a corpus id from a document URL: the text after the last `/`.
pub fn corpus_id_from_url(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}
