//! End-to-end tests for `FessSearch` over HTTP against an in-process stub
//! of the Fess admin and search APIs.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::Mutex;

use beir_fess_repository::{FessSearch, FessSearchConfig, SearchError};
use beir_fess_shared::{Corpus, CorpusDocument, Queries};

#[derive(Debug, Clone)]
struct Call {
    path: &'static str,
    authorization: Option<String>,
    body: Option<Value>,
    params: HashMap<String, String>,
}

struct Stub {
    delete_status: i64,
    bulk_status: i64,
    search_status: StatusCode,
    hits: Value,
    calls: Mutex<Vec<Call>>,
}

impl Stub {
    fn new() -> Self {
        Self {
            delete_status: 0,
            bulk_status: 0,
            search_status: StatusCode::OK,
            hits: json!([]),
            calls: Mutex::new(Vec::new()),
        }
    }

    async fn calls_to(&self, path: &str) -> Vec<Call> {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|call| call.path == path)
            .cloned()
            .collect()
    }
}

fn authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn delete_all(
    State(stub): State<Arc<Stub>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    stub.calls.lock().await.push(Call {
        path: "delete",
        authorization: authorization(&headers),
        body: Some(body),
        params: HashMap::new(),
    });
    Json(json!({ "response": { "status": stub.delete_status } }))
}

async fn bulk(
    State(stub): State<Arc<Stub>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    stub.calls.lock().await.push(Call {
        path: "bulk",
        authorization: authorization(&headers),
        body: Some(body),
        params: HashMap::new(),
    });
    Json(json!({ "response": { "status": stub.bulk_status } }))
}

async fn documents(
    State(stub): State<Arc<Stub>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    stub.calls.lock().await.push(Call {
        path: "search",
        authorization: authorization(&headers),
        body: None,
        params,
    });
    (stub.search_status, Json(json!({ "data": stub.hits })))
}

async fn spawn_stub(stub: Stub) -> (String, Arc<Stub>) {
    let stub = Arc::new(stub);
    let app = Router::new()
        .route("/api/admin/searchlist/query", delete(delete_all))
        .route("/api/admin/documents/bulk", post(bulk))
        .route("/api/v1/documents", get(documents))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), stub)
}

fn config(base_url: &str) -> FessSearchConfig {
    FessSearchConfig::new("test")
        .with_base_url(base_url)
        .with_access_token("secret-token")
        .with_settle_delay(Duration::ZERO)
}

fn single_query(id: &str, text: &str) -> Queries {
    let mut queries = Queries::new();
    queries.insert(id.to_string(), text.to_string());
    queries
}

#[tokio::test]
async fn test_end_to_end_search() {
    let mut stub = Stub::new();
    stub.hits = json!([{ "url": "http://beir.codelibs.org/test/d1", "score": 3.5 }]);
    let (url, stub) = spawn_stub(stub).await;

    let adapter = FessSearch::connect(config(&url)).await.unwrap();

    let mut corpus = Corpus::new();
    corpus.insert("d1".to_string(), CorpusDocument::new("A", "x"));
    let results = adapter
        .search(&corpus, &single_query("q1", "x"), 1)
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results["q1"].len(), 1);
    assert_eq!(results["q1"]["d1"], 3.5);

    let deletes = stub.calls_to("delete").await;
    assert_eq!(deletes.len(), 1);
    assert_eq!(deletes[0].body, Some(json!({ "q": "*:*" })));
    assert_eq!(deletes[0].authorization.as_deref(), Some("secret-token"));

    let bulks = stub.calls_to("bulk").await;
    assert_eq!(bulks.len(), 1);
    assert_eq!(bulks[0].authorization.as_deref(), Some("secret-token"));
    let uploaded = &bulks[0].body.as_ref().unwrap()["documents"];
    assert_eq!(uploaded.as_array().unwrap().len(), 1);
    assert_eq!(uploaded[0]["title"], "A");
    assert_eq!(uploaded[0]["url"], "http://beir.codelibs.org/test/d1");

    let searches = stub.calls_to("search").await;
    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0].params["q"], "x");
    assert_eq!(searches[0].params["start"], "0");
    assert_eq!(searches[0].params["num"], "2");
    assert!(searches[0].authorization.is_none());
}

#[tokio::test]
async fn test_query_id_filtered_from_results() {
    let mut stub = Stub::new();
    stub.hits = json!([
        { "url": "http://beir.codelibs.org/test/q1", "score": 10.0 },
        { "url": "http://beir.codelibs.org/test/d7", "score": 4.0 },
        { "url": "http://beir.codelibs.org/test/d8" }
    ]);
    let (url, _stub) = spawn_stub(stub).await;

    let adapter = FessSearch::connect(config(&url).with_initialize(false))
        .await
        .unwrap();
    let results = adapter
        .search(&Corpus::new(), &single_query("q1", "anything"), 2)
        .await
        .unwrap();

    let scores = &results["q1"];
    assert!(!scores.contains_key("q1"));
    assert_eq!(scores["d7"], 4.0);
    assert_eq!(scores["d8"], 0.0);
}

#[tokio::test]
async fn test_reset_failure_is_fatal() {
    let mut stub = Stub::new();
    stub.delete_status = 1;
    let (url, stub) = spawn_stub(stub).await;

    let result = FessSearch::connect(config(&url)).await;

    match result {
        Err(SearchError::RemoteOperation { response, .. }) => {
            assert!(response.contains("\"status\":1"));
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("reset should have failed"),
    }
    assert!(stub.calls_to("bulk").await.is_empty());
}

#[tokio::test]
async fn test_bulk_failure_stops_ingest() {
    let mut stub = Stub::new();
    stub.bulk_status = 1;
    let (url, stub) = spawn_stub(stub).await;

    let adapter = FessSearch::connect(config(&url).with_bulk_size(1))
        .await
        .unwrap();

    let mut corpus = Corpus::new();
    for id in ["d1", "d2", "d3"] {
        corpus.insert(id.to_string(), CorpusDocument::untitled("text"));
    }
    let result = adapter.search(&corpus, &single_query("q1", "text"), 10).await;

    assert!(matches!(result, Err(SearchError::RemoteOperation { .. })));
    assert_eq!(stub.calls_to("bulk").await.len(), 1);
    assert!(stub.calls_to("search").await.is_empty());
}

#[tokio::test]
async fn test_non_200_search_is_empty() {
    let mut stub = Stub::new();
    stub.search_status = StatusCode::INTERNAL_SERVER_ERROR;
    stub.hits = json!([{ "url": "http://beir.codelibs.org/test/d1", "score": 1.0 }]);
    let (url, _stub) = spawn_stub(stub).await;

    let adapter = FessSearch::connect(config(&url).with_initialize(false))
        .await
        .unwrap();

    let mut queries = single_query("q1", "a");
    queries.insert("q2".to_string(), "b".to_string());
    let results = adapter.search(&Corpus::new(), &queries, 5).await.unwrap();

    assert_eq!(results.len(), 2);
    assert!(results["q1"].is_empty());
    assert!(results["q2"].is_empty());
}

#[tokio::test]
async fn test_admin_calls_without_token_omit_authorization() {
    let (url, stub) = spawn_stub(Stub::new()).await;

    let config = FessSearchConfig::new("test")
        .with_base_url(&url)
        .with_settle_delay(Duration::ZERO);
    let adapter = FessSearch::connect(config).await.unwrap();
    adapter.reset().await.unwrap();

    let deletes = stub.calls_to("delete").await;
    assert_eq!(deletes.len(), 2);
    assert!(deletes.iter().all(|call| call.authorization.is_none()));
}

#[tokio::test]
async fn test_connection_refused_propagates() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = FessSearch::connect(config(&format!("http://{}", addr))).await;

    assert!(matches!(result, Err(SearchError::ConnectionError(_))));
}
