//! # API REST
//!
//! REST API implementation for TextLens.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, status codes, CORS, request tracing)
//!
//! Uses `api-shared` for request/response types and `textlens-core` for all analysis logic.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use textlens_core::AnalysisService;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::ApiError;

/// Application state shared across REST API handlers
#[derive(Clone)]
pub struct AppState {
    pub service: AnalysisService,
}

impl AppState {
    pub fn new(service: AnalysisService) -> Self {
        Self { service }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(handlers::health, handlers::analyze, handlers::search),
    components(schemas(
        api_shared::HealthRes,
        api_shared::AnalyzeReq,
        api_shared::AnalysisRes,
        api_shared::ErrorRes,
    ))
)]
pub struct ApiDoc;

/// Build the REST router with all routes, Swagger UI and middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/search", get(handlers::search))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::INTERNAL_ERROR_MESSAGE;
    use crate::handlers::{INVALID_TEXTS_MESSAGE, INVALID_TEXT_ITEM_MESSAGE, MISSING_TOPIC_MESSAGE};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use textlens_core::{
        AnalysisProvider, AnalysisResult, AnalysisStore, CoreConfig, KeywordExtractor,
        ProviderAnalysis, StructuredData,
    };
    use tower::ServiceExt;

    const MOCK_SUMMARY: &str =
        "This is a mock summary of the provided text, highlighting its key points and themes.";

    fn test_app() -> (Router, AnalysisService) {
        let service =
            AnalysisService::from_config(&CoreConfig::in_memory()).expect("service should build");
        (router(AppState::new(service.clone())), service)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn post_analyze(app: &Router, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(app, request).await
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        send(app, request).await
    }

    #[tokio::test]
    async fn test_health_check() {
        let (app, _) = test_app();
        let (status, body) = get_json(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn test_analyze_single_success() {
        let (app, _) = test_app();
        let (status, body) = post_analyze(
            &app,
            json!({"texts": ["This is a test about cars and driving."]}),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert!(body.is_object(), "single text returns a bare object");
        assert_eq!(body["summary"], MOCK_SUMMARY);
        assert_eq!(
            body["topics"],
            json!(["mock data", "software testing", "prototyping"])
        );
        assert_eq!(body["keywords"], json!(["test", "cars"]));
        assert_eq!(body["title"], "A Mock Analysis");
        assert_eq!(body["sentiment"], "neutral");
        assert_eq!(body["confidence"], 0.95);
        assert!(body["id"].is_i64());
    }

    #[tokio::test]
    async fn test_analyze_batch_success() {
        let (app, service) = test_app();
        let (status, body) = post_analyze(
            &app,
            json!({"texts": ["First text.", "Second text about engineering."]}),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        let items = body.as_array().expect("batch returns an array");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["keywords"], json!(["text"]));
        assert_eq!(items[1]["keywords"], json!(["text", "engineering"]));
        assert_eq!(service.store().count().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_analyze_empty_input() {
        let (app, service) = test_app();
        let (status, body) = post_analyze(&app, json!({})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("Input must be a non-empty array"));
        assert_eq!(body["error"], INVALID_TEXTS_MESSAGE);
        assert_eq!(service.store().count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_analyze_non_json_body() {
        let (app, _) = test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header("content-type", "application/json")
            .body(Body::from("not json"))
            .unwrap();
        let (status, body) = send(&app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], INVALID_TEXTS_MESSAGE);
    }

    #[tokio::test]
    async fn test_analyze_blank_item_rejects_whole_batch() {
        let (app, service) = test_app();
        let (status, body) =
            post_analyze(&app, json!({"texts": ["A valid text.", "   "]})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], INVALID_TEXT_ITEM_MESSAGE);
        assert_eq!(service.store().count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_analyze_llm_failure() {
        let (app, service) = test_app();
        let (status, body) =
            post_analyze(&app, json!({"texts": ["This text will FAIL_LLM."]})).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("Mock LLM service was triggered to fail"));
        assert_eq!(service.store().count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_analyze_llm_failure_rolls_back_earlier_items() {
        let (app, service) = test_app();
        post_analyze(&app, json!({"texts": ["Already stored."]})).await;
        let before = service.store().count().unwrap();

        let (status, _) = post_analyze(
            &app,
            json!({"texts": ["Valid first.", "Valid second.", "Then FAIL_LLM."]}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(service.store().count().unwrap(), before);
    }

    /// Provider whose output cannot be stored.
    struct BrokenProvider;

    impl AnalysisProvider for BrokenProvider {
        fn analyze_text(&self, _text: &str) -> AnalysisResult<ProviderAnalysis> {
            Ok(ProviderAnalysis {
                summary: String::new(),
                structured_data: StructuredData {
                    title: None,
                    topics: vec![],
                    sentiment: "neutral".into(),
                    confidence: None,
                },
            })
        }
    }

    #[tokio::test]
    async fn test_analyze_internal_failure_is_generic() {
        let service = AnalysisService::new(
            Arc::new(BrokenProvider),
            Arc::new(KeywordExtractor::new()),
            Arc::new(AnalysisStore::in_memory().unwrap()),
            3,
        );
        let app = router(AppState::new(service.clone()));

        let (status, body) = post_analyze(&app, json!({"texts": ["Some text."]})).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], INTERNAL_ERROR_MESSAGE);
        assert_eq!(service.store().count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_search_functionality() {
        let (app, _) = test_app();
        post_analyze(
            &app,
            json!({"texts": ["This text is about the solar system and planets."]}),
        )
        .await;

        let (status, body) = get_json(&app, "/api/search?topic=planets").await;
        assert_eq!(status, StatusCode::OK);
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["keywords"], json!(["text", "system", "planets"]));

        let (status, body) = get_json(&app, "/api/search?topic=prototyping").await;
        assert_eq!(status, StatusCode::OK);
        let items = body.as_array().unwrap();
        assert!(!items.is_empty());
        assert!(items[0]["topics"]
            .as_array()
            .unwrap()
            .contains(&json!("prototyping")));
    }

    #[tokio::test]
    async fn test_search_matches_whole_elements_only() {
        let (app, _) = test_app();
        post_analyze(
            &app,
            json!({"texts": ["This text is about the solar system and planets."]}),
        )
        .await;

        let (status, body) = get_json(&app, "/api/search?topic=plan").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (_, body) = get_json(&app, "/api/search?topic=mock%20data").await;
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_search_repeated_topic_uses_first_value() {
        let (app, _) = test_app();
        post_analyze(
            &app,
            json!({"texts": ["This text is about the solar system and planets."]}),
        )
        .await;

        let (status, body) = get_json(&app, "/api/search?topic=planets&topic=cars").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, body) = get_json(&app, "/api/search?topic=cars&topic=planets").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_search_requires_topic() {
        let (app, _) = test_app();

        for uri in ["/api/search", "/api/search?topic=", "/api/search?topic=%20%20"] {
            let (status, body) = get_json(&app, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["error"], MISSING_TOPIC_MESSAGE);
        }
    }

    #[tokio::test]
    async fn test_search_returns_insertion_order() {
        let (app, _) = test_app();
        post_analyze(&app, json!({"texts": ["Planets first.", "More planets."]})).await;
        post_analyze(&app, json!({"texts": ["Planets again."]})).await;

        let (_, body) = get_json(&app, "/api/search?topic=prototyping").await;
        let ids: Vec<i64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids.len(), 3);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn openapi_document_lists_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/api/analyze"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/search"));
        assert!(paths.iter().any(|p| p.as_str() == "/health"));
    }
}
