//! Text analysis providers.
//!
//! A provider turns raw text into a summary plus structured metadata. The analysis service only
//! talks to the [`AnalysisProvider`] trait, so a real summarisation backend can replace
//! [`MockAnalysisProvider`] without touching the orchestration.
//!
//! Providers report an outage of their backing service as [`AnalysisError::Upstream`]; any other
//! error they return is treated as an internal fault.

use crate::constants::MOCK_FAILURE_SENTINEL;
use crate::{AnalysisError, AnalysisResult};
use serde::{Deserialize, Serialize};

/// Structured metadata extracted by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredData {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub sentiment: String,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Complete provider output for one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderAnalysis {
    pub summary: String,
    pub structured_data: StructuredData,
}

/// A backend capable of summarising text.
pub trait AnalysisProvider: Send + Sync {
    /// Analyse one text.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Upstream`] when the backing service is unavailable.
    fn analyze_text(&self, text: &str) -> AnalysisResult<ProviderAnalysis>;
}

/// Stand-in provider returning a fixed analysis.
///
/// Any text containing the sentinel substring (by default [`MOCK_FAILURE_SENTINEL`]) makes it
/// fail as though the upstream service were down.
#[derive(Debug, Clone)]
pub struct MockAnalysisProvider {
    sentinel: String,
}

impl MockAnalysisProvider {
    pub const SUMMARY: &'static str =
        "This is a mock summary of the provided text, highlighting its key points and themes.";
    pub const TITLE: &'static str = "A Mock Analysis";
    pub const TOPICS: [&'static str; 3] = ["mock data", "software testing", "prototyping"];
    pub const SENTIMENT: &'static str = "neutral";
    pub const CONFIDENCE: f64 = 0.95;
    pub const FAILURE_MESSAGE: &'static str = "Mock LLM service was triggered to fail.";

    pub fn new() -> Self {
        Self::with_sentinel(MOCK_FAILURE_SENTINEL)
    }

    pub fn with_sentinel(sentinel: impl Into<String>) -> Self {
        Self {
            sentinel: sentinel.into(),
        }
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }
}

impl Default for MockAnalysisProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisProvider for MockAnalysisProvider {
    fn analyze_text(&self, text: &str) -> AnalysisResult<ProviderAnalysis> {
        if !self.sentinel.is_empty() && text.contains(&self.sentinel) {
            tracing::warn!("mock provider sentinel found, simulating upstream failure");
            return Err(AnalysisError::Upstream(Self::FAILURE_MESSAGE.into()));
        }

        Ok(ProviderAnalysis {
            summary: Self::SUMMARY.into(),
            structured_data: StructuredData {
                title: Some(Self::TITLE.into()),
                topics: Self::TOPICS.iter().map(|t| t.to_string()).collect(),
                sentiment: Self::SENTIMENT.into(),
                confidence: Some(Self::CONFIDENCE),
            },
        })
    }
}
