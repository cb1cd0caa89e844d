//! # TextLens Core
//!
//! Core business logic for the TextLens text analysis service.
//!
//! This crate contains:
//! - Keyword extraction (tokenising, part-of-speech tagging, stopword filtering, ranking)
//! - The pluggable analysis provider interface and its mock implementation
//! - The SQLite-backed analysis record store
//! - The analyze/search orchestration used by every API surface
//!
//! **No API concerns**: HTTP servers, routing and status codes belong in `api-rest`.

pub mod config;
pub mod constants;
pub mod error;
pub mod keywords;
pub mod provider;
pub mod record;
pub mod service;
pub mod store;

pub use config::{CoreConfig, DatabaseLocation};
pub use error::{AnalysisError, AnalysisResult, ErrorKind};
pub use keywords::KeywordExtractor;
pub use provider::{AnalysisProvider, MockAnalysisProvider, ProviderAnalysis, StructuredData};
pub use record::{AnalysisDraft, AnalysisRecord};
pub use service::AnalysisService;
pub use store::AnalysisStore;
pub use textlens_types::{NonEmptyText, TextError};
