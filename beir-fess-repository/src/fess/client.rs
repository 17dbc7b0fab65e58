//! Fess HTTP client implementation.
//!
//! Admin calls report success inside a `{"response": {"status": 0}}`
//! envelope rather than through the HTTP status, so every admin response
//! body is inspected. Search calls only look at the HTTP status.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::errors::SearchError;
use crate::interfaces::SearchBackend;
use crate::types::{corpus_id_from_url, RemoteDocument};
use beir_fess_shared::ScoredDocument;

const DELETE_ALL_PATH: &str = "/api/admin/searchlist/query";
const BULK_PATH: &str = "/api/admin/documents/bulk";
const SEARCH_PATH: &str = "/api/v1/documents";

/// Fess client implementation.
///
/// # Example
///
/// ```ignore
/// let client = FessClient::new("http://localhost:8080", Some("token".to_string()))?;
/// client.delete_all().await?;
/// let hits = client.fetch_documents("what is bm25", 11).await?;
/// ```
pub struct FessClient {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl FessClient {
    /// Create a new Fess client for the server at `base_url`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The Fess server URL (e.g., "http://localhost:8080")
    /// * `access_token` - Sent as the `Authorization` header on admin calls
    ///
    /// # Returns
    ///
    /// * `Ok(FessClient)` - A new client instance
    /// * `Err(SearchError)` - If the URL is invalid or the HTTP client cannot be built
    pub fn new(base_url: &str, access_token: Option<String>) -> Result<Self, SearchError> {
        Url::parse(base_url).map_err(|e| {
            SearchError::invalid_config(format!("Invalid base_url {}: {}", base_url, e))
        })?;

        let client = Client::builder()
            .no_proxy()
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        info!(url = %base_url, authorized = access_token.is_some(), "Created Fess client");

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the JSON content type and, when configured, the credential.
    fn admin_headers(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(CONTENT_TYPE, "application/json");
        match &self.access_token {
            Some(token) => request.header(AUTHORIZATION, token),
            None => request,
        }
    }

    /// Send an admin request and require a zero status in the response envelope.
    async fn send_admin(&self, operation: &str, request: RequestBuilder) -> Result<(), SearchError> {
        let response = request.send().await?;
        let http_status = response.status();
        let body = response.text().await?;

        if envelope_status(&body) != Some(0.0) {
            error!(
                operation = %operation,
                http_status = %http_status,
                body = %body,
                "Admin request rejected"
            );
            return Err(SearchError::remote_operation(operation, body));
        }
        Ok(())
    }

    /// Convert one entry of the search response's `data` array.
    ///
    /// Entries without a `url` cannot be mapped back to the corpus and are
    /// dropped. A missing or non-numeric score counts as 0.0.
    fn parse_hit(hit: &Value) -> Option<ScoredDocument> {
        let url = hit.get("url")?.as_str()?;
        let score = match hit.get("score") {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => s.parse().unwrap_or(0.0),
            _ => 0.0,
        };
        Some(ScoredDocument::new(corpus_id_from_url(url), score))
    }
}

/// Read the numeric `response.status` from an admin response body, if present.
///
/// Integer and float encodings compare equal, so `0` and `0.0` both mean success.
fn envelope_status(body: &str) -> Option<f64> {
    let value: Value = serde_json::from_str(body).ok()?;
    value.get("response")?.get("status")?.as_f64()
}

#[async_trait]
impl SearchBackend for FessClient {
    #[instrument(skip(self))]
    async fn delete_all(&self) -> Result<(), SearchError> {
        let request = self
            .admin_headers(self.client.delete(self.endpoint(DELETE_ALL_PATH)))
            .json(&json!({ "q": "*:*" }));

        self.send_admin("delete all documents", request).await?;
        info!("Deleted all documents");
        Ok(())
    }

    #[instrument(skip(self, documents), fields(count = documents.len()))]
    async fn bulk_upload(&self, documents: &[RemoteDocument]) -> Result<(), SearchError> {
        let request = self
            .admin_headers(self.client.post(self.endpoint(BULK_PATH)))
            .json(&json!({ "documents": documents }));

        self.send_admin("bulk upload", request).await?;
        debug!(count = documents.len(), "Uploaded batch");
        Ok(())
    }

    #[instrument(skip(self, query))]
    async fn fetch_documents(
        &self,
        query: &str,
        size: usize,
    ) -> Result<Vec<ScoredDocument>, SearchError> {
        let num = size.to_string();
        let response = self
            .client
            .get(self.endpoint(SEARCH_PATH))
            .header(CONTENT_TYPE, "application/json")
            .query(&[("q", query), ("start", "0"), ("num", num.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = %status, "Search request failed, treating as no results");
            return Ok(Vec::new());
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        let hits = body
            .get("data")
            .and_then(Value::as_array)
            .map(|data| data.iter().filter_map(Self::parse_hit).collect())
            .unwrap_or_default();
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_status() {
        assert_eq!(envelope_status(r#"{"response": {"status": 0}}"#), Some(0.0));
        assert_eq!(envelope_status(r#"{"response": {"status": 0.0}}"#), Some(0.0));
        assert_eq!(envelope_status(r#"{"response": {"status": 1}}"#), Some(1.0));
        assert_eq!(envelope_status(r#"{"response": {"status": "0"}}"#), None);
        assert_eq!(envelope_status(r#"{"response": {}}"#), None);
        assert_eq!(envelope_status("<html>Forbidden</html>"), None);
    }

    #[test]
    fn test_parse_hit() {
        let hit = json!({
            "url": "http://beir.codelibs.org/scifact/d42",
            "title": "ignored",
            "score": 3.5
        });

        let result = FessClient::parse_hit(&hit).unwrap();

        assert_eq!(result.corpus_id, "d42");
        assert_eq!(result.score, 3.5);
    }

    #[test]
    fn test_parse_hit_default_score() {
        let hit = json!({ "url": "http://beir.codelibs.org/scifact/d1" });
        assert_eq!(FessClient::parse_hit(&hit).unwrap().score, 0.0);

        let hit = json!({ "url": "http://beir.codelibs.org/scifact/d1", "score": "1.25" });
        assert_eq!(FessClient::parse_hit(&hit).unwrap().score, 1.25);
    }

    #[test]
    fn test_parse_hit_no_url() {
        let hit = json!({ "score": 2.0 });
        assert!(FessClient::parse_hit(&hit).is_none());
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = FessClient::new("http://localhost:8080/", None).unwrap();
        assert_eq!(
            client.endpoint(SEARCH_PATH),
            "http://localhost:8080/api/v1/documents"
        );
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        assert!(matches!(
            FessClient::new("localhost 8080", None),
            Err(SearchError::InvalidConfig(_))
        ));
    }
}
