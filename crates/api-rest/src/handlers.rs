//! REST endpoint handlers.

use crate::error::ApiError;
use crate::AppState;
use api_shared::{AnalysisRes, AnalyzeReq, AnalyzeRes, ErrorRes, HealthRes, HealthService, SearchParams};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::Json,
};
use serde_json::Value;
use textlens_core::{AnalysisRecord, NonEmptyText};

pub const INVALID_TEXTS_MESSAGE: &str =
    "Input must be a non-empty array of strings in the 'texts' field.";
pub const INVALID_TEXT_ITEM_MESSAGE: &str = "All items in 'texts' must be non-empty strings.";
pub const MISSING_TOPIC_MESSAGE: &str = "A 'topic' query parameter is required";

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
pub async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/api/analyze",
    request_body = AnalyzeReq,
    responses(
        (status = 201, description = "Analyses created; a single object for one text, an array otherwise", body = AnalysisRes),
        (status = 400, description = "Malformed input", body = ErrorRes),
        (status = 502, description = "Analysis provider failure", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Analyse a batch of texts
///
/// Every text is summarised by the analysis provider and gets locally extracted keywords. The
/// resulting records are stored together: if any text fails, nothing is stored.
///
/// # Errors
/// - `400 Bad Request` if `texts` is missing, not an array, empty, or holds a blank or
///   non-string item.
/// - `502 Bad Gateway` if the analysis provider reports a failure.
/// - `500 Internal Server Error` for anything else.
#[axum::debug_handler]
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<AnalyzeRes>), ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!("rejected analyze body: {}", rejection);
        ApiError::BadRequest(INVALID_TEXTS_MESSAGE.into())
    })?;
    let texts = parse_texts(&body)?;

    let records = state.service.analyze_batch(&texts)?;
    let records = records.into_iter().map(to_res).collect();

    Ok((StatusCode::CREATED, Json(AnalyzeRes::from_records(records))))
}

#[utoipa::path(
    get,
    path = "/api/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Records with a matching topic or keyword", body = Vec<AnalysisRes>),
        (status = 400, description = "Missing topic", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Search stored analyses by topic or keyword
///
/// A record matches when one of its topics or keywords equals the query (ignoring ASCII case).
/// Results come back in the order they were stored. When `topic` is repeated the first value is
/// used.
#[axum::debug_handler]
pub async fn search(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<AnalysisRes>>, ApiError> {
    let Query(pairs) = query.map_err(|rejection| {
        tracing::debug!("rejected search query: {}", rejection);
        ApiError::BadRequest(MISSING_TOPIC_MESSAGE.into())
    })?;
    let params = SearchParams::from_pairs(pairs);

    let topic = params
        .topic
        .as_deref()
        .and_then(|t| NonEmptyText::new(t).ok())
        .ok_or_else(|| ApiError::BadRequest(MISSING_TOPIC_MESSAGE.into()))?;

    let records = state.service.search(&topic)?;
    Ok(Json(records.into_iter().map(to_res).collect()))
}

/// Validate the `texts` field of an analyze request body.
///
/// Blank checks ignore surrounding whitespace; accepted texts are returned unchanged.
fn parse_texts(body: &Value) -> Result<Vec<String>, ApiError> {
    let items = body
        .get("texts")
        .and_then(Value::as_array)
        .filter(|items| !items.is_empty())
        .ok_or_else(|| ApiError::BadRequest(INVALID_TEXTS_MESSAGE.into()))?;

    items
        .iter()
        .map(|item| {
            item.as_str()
                .filter(|text| NonEmptyText::new(text).is_ok())
                .map(str::to_owned)
                .ok_or_else(|| ApiError::BadRequest(INVALID_TEXT_ITEM_MESSAGE.into()))
        })
        .collect()
}

fn to_res(record: AnalysisRecord) -> AnalysisRes {
    AnalysisRes {
        id: record.id,
        summary: record.summary,
        title: record.title,
        topics: record.topics,
        sentiment: record.sentiment,
        keywords: record.keywords,
        confidence: record.confidence,
    }
}
