//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Request handling never reads process-wide environment variables;
//! binaries read them once and hand the parsed values to [`CoreConfig::new`].

use crate::constants::{
    DEFAULT_DATABASE_PATH, DEFAULT_KEYWORD_COUNT, IN_MEMORY_DATABASE, MAX_KEYWORD_COUNT,
};
use crate::{AnalysisError, AnalysisResult};
use std::path::{Path, PathBuf};

/// Where the analysis store keeps its data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatabaseLocation {
    /// A SQLite database file, created on first use.
    File(PathBuf),
    /// A private in-memory database that lives as long as the store.
    InMemory,
}

impl DatabaseLocation {
    pub fn display(&self) -> String {
        match self {
            DatabaseLocation::File(path) => path.display().to_string(),
            DatabaseLocation::InMemory => IN_MEMORY_DATABASE.to_string(),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    database: DatabaseLocation,
    keyword_count: usize,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` if `keyword_count` is zero or larger than
    /// [`MAX_KEYWORD_COUNT`].
    pub fn new(database: DatabaseLocation, keyword_count: usize) -> AnalysisResult<Self> {
        if keyword_count == 0 || keyword_count > MAX_KEYWORD_COUNT {
            return Err(AnalysisError::InvalidInput(format!(
                "keyword count must be between 1 and {}",
                MAX_KEYWORD_COUNT
            )));
        }

        Ok(Self {
            database,
            keyword_count,
        })
    }

    /// Configuration backed by a fresh in-memory database and default keyword count.
    pub fn in_memory() -> Self {
        Self {
            database: DatabaseLocation::InMemory,
            keyword_count: DEFAULT_KEYWORD_COUNT,
        }
    }

    pub fn database(&self) -> &DatabaseLocation {
        &self.database
    }

    pub fn keyword_count(&self) -> usize {
        self.keyword_count
    }
}

/// Parse the database location from an optional string value.
///
/// `None` or a blank value selects [`DEFAULT_DATABASE_PATH`]; the literal `:memory:` selects an
/// in-memory database.
pub fn database_location_from_env_value(value: Option<String>) -> DatabaseLocation {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value.as_deref() {
        Some(IN_MEMORY_DATABASE) => DatabaseLocation::InMemory,
        Some(path) => DatabaseLocation::File(Path::new(path).to_path_buf()),
        None => DatabaseLocation::File(PathBuf::from(DEFAULT_DATABASE_PATH)),
    }
}

/// Parse the keyword count from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_KEYWORD_COUNT`].
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if the value is not a positive integer.
pub fn keyword_count_from_env_value(value: Option<String>) -> AnalysisResult<usize> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(DEFAULT_KEYWORD_COUNT),
        Some(v) => v.parse::<usize>().map_err(|_| {
            AnalysisError::InvalidInput(format!("keyword count must be an integer, got '{}'", v))
        }),
    }
}
