//! Request and response bodies of the TextLens HTTP API.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Body of `POST /api/analyze`.
///
/// Documentation only: the handler validates the raw JSON itself so that every malformed shape
/// gets the same error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeReq {
    /// Texts to analyse, at least one, none blank.
    pub texts: Vec<String>,
}

/// One stored analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisRes {
    pub id: i64,
    pub summary: String,
    pub title: Option<String>,
    pub topics: Vec<String>,
    pub sentiment: String,
    pub keywords: Vec<String>,
    pub confidence: Option<f64>,
}

/// Response of `POST /api/analyze`: a bare record for a single text, an array otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalyzeRes {
    Single(AnalysisRes),
    Batch(Vec<AnalysisRes>),
}

impl AnalyzeRes {
    /// Wrap records the way the API returns them.
    pub fn from_records(mut records: Vec<AnalysisRes>) -> Self {
        if records.len() == 1 {
            if let Some(record) = records.pop() {
                return AnalyzeRes::Single(record);
            }
        }
        AnalyzeRes::Batch(records)
    }
}

/// Query string of `GET /api/search`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Topic or keyword to look for; must match a whole element.
    pub topic: Option<String>,
}

impl SearchParams {
    /// Build from decoded query pairs. A repeated `topic` keeps its first value.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let topic = pairs
            .into_iter()
            .find(|(key, _)| key == "topic")
            .map(|(_, value)| value);
        Self { topic }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
