//! # API Shared
//!
//! Shared definitions for TextLens APIs.
//!
//! Contains:
//! - Request/response types (`types` module) with serde and OpenAPI schema derives
//! - Shared services like `HealthService`
//!
//! Kept free of any dependency on `textlens-core` so API clients can depend on it alone.

pub mod health;
pub mod types;

pub use health::HealthService;
pub use types::*;
