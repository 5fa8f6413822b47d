//! Route tests for the WikiPlex router.
//!
//! The answer service is replaced by a stub `AnswerSource`, so these tests
//! exercise routing, status mapping and page rendering without network I/O.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`
use wikiplex::{create_app, AnswerSource, AppState, RawAnswer, Result, WikiPlexError};

const ANSWER: &str = "# Overview\nQuantum computers use qubits.\n# History\nProposed in the 1980s.\nSuggested Citations:\n1. Nielsen & Chuang";

enum Behavior {
    Answer(&'static str),
    MissingKey,
    Upstream,
}

struct StubSource {
    behavior: Behavior,
    calls: AtomicUsize,
}

impl StubSource {
    fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl AnswerSource for StubSource {
    async fn fetch(&self, term: &str) -> Result<RawAnswer> {
        if term.trim().is_empty() {
            return Err(WikiPlexError::MissingSearchTerm);
        }
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            Behavior::Answer(text) => Ok(RawAnswer {
                text: text.to_string(),
                image_url: Some("https://img.example/q.png".to_string()),
            }),
            Behavior::MissingKey => Err(WikiPlexError::Configuration {
                reason: "API key not configured".to_string(),
            }),
            Behavior::Upstream => Err(WikiPlexError::Upstream {
                status: 502,
                body: "bad gateway".to_string(),
            }),
        }
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn app_with(source: Arc<StubSource>) -> Router {
    create_app(AppState::new(source))
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = body_string(response).await;
    (status, serde_json::from_str(&body).unwrap())
}

async fn get(app: Router, uri: &str) -> axum::response::Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

#[tokio::test]
async fn test_api_search_returns_content() {
    let source = StubSource::new(Behavior::Answer(ANSWER));
    let (status, body) = post_json(
        app_with(source.clone()),
        "/api/search",
        json!({"searchTerm": "Quantum computing"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], ANSWER);
    assert_eq!(body["citations"], json!([]));
    assert_eq!(body["imageUrl"], "https://img.example/q.png");
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_api_search_requires_search_term() {
    for payload in [json!({}), json!({"searchTerm": ""}), json!({"searchTerm": "  "}), json!({"searchTerm": 7})] {
        let source = StubSource::new(Behavior::Answer(ANSWER));
        let (status, body) = post_json(app_with(source.clone()), "/api/search", payload.clone()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {}", payload);
        assert_eq!(body["error"], "Search term is required");
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }
}

#[tokio::test]
async fn test_api_search_missing_credential_is_500() {
    let (status, body) = post_json(
        app_with(StubSource::new(Behavior::MissingKey)),
        "/api/search",
        json!({"searchTerm": "rust"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "API key not configured");
}

#[tokio::test]
async fn test_api_search_upstream_failure_is_500() {
    let (status, body) = post_json(
        app_with(StubSource::new(Behavior::Upstream)),
        "/api/search",
        json!({"searchTerm": "rust"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to process search request");
}

#[tokio::test]
async fn test_api_bodies_that_are_not_json_get_json_errors() {
    let cases = [
        ("/api/search", Some("application/json"), "{not json"),
        ("/api/search", None, r#"{"searchTerm": "rust"}"#),
        ("/api/parse", Some("application/json"), "{\"content\": "),
        ("/api/parse", Some("text/plain"), r#"{"content": "x"}"#),
    ];

    for (uri, content_type, raw) in cases {
        let source = StubSource::new(Behavior::Answer(ANSWER));
        let mut request = Request::builder().method(Method::POST).uri(uri);
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        let request = request.body(Body::from(raw)).unwrap();

        let response = app_with(source.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{} {:?}", uri, raw);
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(!body["error"].as_str().unwrap().is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }
}

#[tokio::test]
async fn test_api_parse() {
    let app = app_with(StubSource::new(Behavior::Answer(ANSWER)));
    let (status, body) = post_json(app, "/api/parse", json!({"content": ANSWER})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sections"][0]["id"], "overview");
    assert_eq!(body["sections"][1]["body"], "Proposed in the 1980s.");
    assert_eq!(body["citations"], json!([{"id": "1", "content": "1. Nielsen & Chuang"}]));
}

#[tokio::test]
async fn test_api_parse_rejects_non_string_content() {
    for payload in [json!({}), json!({"content": null}), json!({"content": 12}), json!({"content": ["# A"]})] {
        let app = app_with(StubSource::new(Behavior::Answer(ANSWER)));
        let (status, body) = post_json(app, "/api/parse", payload.clone()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {}", payload);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid input"));
    }
}

#[tokio::test]
async fn test_search_redirects_to_slug() {
    let app = app_with(StubSource::new(Behavior::Answer(ANSWER)));
    let response = get(app, "/search?q=Quantum+Computing%21%21").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/results/quantum-computing"
    );
}

#[tokio::test]
async fn test_empty_search_redirects_home() {
    let app = app_with(StubSource::new(Behavior::Answer(ANSWER)));
    let response = get(app, "/search?q=%21%21").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
}

#[tokio::test]
async fn test_results_page_renders_article() {
    let source = StubSource::new(Behavior::Answer(ANSWER));
    let response = get(app_with(source.clone()), "/results/quantum-computing").await;

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_string(response).await;

    assert!(page.contains("<h1>Quantum computing</h1>"));
    assert!(page.contains("<section id=\"overview\">"));
    assert!(page.contains("<a href=\"#history\">History</a>"));
    assert!(page.contains("1. Nielsen &amp; Chuang"));
    assert!(page.contains("Perplexity AI"));
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_results_page_redirects_non_canonical_slug() {
    let source = StubSource::new(Behavior::Answer(ANSWER));
    let response = get(app_with(source.clone()), "/results/Quantum%20Computing").await;

    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/results/quantum-computing"
    );
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_results_page_degrades_to_generic_error() {
    for behavior in [Behavior::MissingKey, Behavior::Upstream] {
        let response = get(app_with(StubSource::new(behavior)), "/results/rust").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let page = body_string(response).await;
        assert!(page.contains("Failed to fetch article data. Please try again later."));
        assert!(!page.contains("API key"));
        assert!(!page.contains("bad gateway"));
    }
}

#[tokio::test]
async fn test_page_source_is_separate_from_api_source() {
    let api = StubSource::new(Behavior::Upstream);
    let pages = StubSource::new(Behavior::Answer(ANSWER));
    let app = create_app(AppState::new(api.clone()).with_page_source(pages.clone()));

    let response = get(app, "/results/quantum-computing").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(pages.calls.load(Ordering::SeqCst), 1);
    assert_eq!(api.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_home_and_health() {
    let app = app_with(StubSource::new(Behavior::Answer(ANSWER)));
    let response = get(app.clone(), "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Your gateway to endless knowledge exploration"));

    let response = get(app, "/healthz").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}
