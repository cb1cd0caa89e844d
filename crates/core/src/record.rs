//! Analysis records.
//!
//! An [`AnalysisDraft`] is a validated record that has not been stored yet. Only the store turns
//! drafts into [`AnalysisRecord`]s, assigning the id as part of a committed batch.

use crate::constants::{SENTIMENT_MAX_CHARS, SUMMARY_MAX_CHARS, TITLE_MAX_CHARS};
use crate::provider::ProviderAnalysis;
use crate::{AnalysisError, AnalysisResult};
use serde::{Deserialize, Serialize};
use textlens_types::NonEmptyText;

/// A stored analysis of one input text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: i64,
    pub summary: String,
    pub title: Option<String>,
    pub topics: Vec<String>,
    pub sentiment: String,
    pub keywords: Vec<String>,
    pub confidence: Option<f64>,
}

/// A record awaiting insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisDraft {
    summary: String,
    title: Option<String>,
    topics: Vec<String>,
    sentiment: String,
    keywords: Vec<String>,
    confidence: Option<f64>,
}

impl AnalysisDraft {
    /// Build a draft from provider output and locally extracted keywords.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidRecord` if the summary or sentiment is blank or too long,
    /// the title is too long, or the confidence is outside `[0, 1]`.
    pub fn new(analysis: ProviderAnalysis, keywords: Vec<String>) -> AnalysisResult<Self> {
        let ProviderAnalysis {
            summary,
            structured_data,
        } = analysis;

        // Limits apply to the trimmed text; the stored value is kept as the provider sent it.
        NonEmptyText::bounded(&summary, SUMMARY_MAX_CHARS)
            .map_err(|e| AnalysisError::InvalidRecord(format!("summary: {e}")))?;
        NonEmptyText::bounded(&structured_data.sentiment, SENTIMENT_MAX_CHARS)
            .map_err(|e| AnalysisError::InvalidRecord(format!("sentiment: {e}")))?;

        if let Some(title) = &structured_data.title {
            let len = title.chars().count();
            if len > TITLE_MAX_CHARS {
                return Err(AnalysisError::InvalidRecord(format!(
                    "title exceeds maximum length of {} characters (got {})",
                    TITLE_MAX_CHARS, len
                )));
            }
        }

        if let Some(confidence) = structured_data.confidence {
            if !(0.0..=1.0).contains(&confidence) {
                return Err(AnalysisError::InvalidRecord(format!(
                    "confidence must be within [0, 1], got {}",
                    confidence
                )));
            }
        }

        Ok(Self {
            summary,
            title: structured_data.title,
            topics: structured_data.topics,
            sentiment: structured_data.sentiment,
            keywords,
            confidence: structured_data.confidence,
        })
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn sentiment(&self) -> &str {
        &self.sentiment
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn confidence(&self) -> Option<f64> {
        self.confidence
    }

    pub(crate) fn into_record(self, id: i64) -> AnalysisRecord {
        AnalysisRecord {
            id,
            summary: self.summary,
            title: self.title,
            topics: self.topics,
            sentiment: self.sentiment,
            keywords: self.keywords,
            confidence: self.confidence,
        }
    }
}
