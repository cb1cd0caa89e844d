//! Constants used throughout the TextLens core crate.

/// Default SQLite database file when no explicit location is configured.
pub const DEFAULT_DATABASE_PATH: &str = "textlens.db";

/// Database location value that selects a private in-memory SQLite database.
pub const IN_MEMORY_DATABASE: &str = ":memory:";

/// Number of keywords extracted per text when not configured otherwise.
pub const DEFAULT_KEYWORD_COUNT: usize = 3;

/// Upper bound accepted for the configured keyword count.
pub const MAX_KEYWORD_COUNT: usize = 50;

/// Maximum length of a stored summary, in characters.
pub const SUMMARY_MAX_CHARS: usize = 500;

/// Maximum length of a stored title, in characters.
pub const TITLE_MAX_CHARS: usize = 200;

/// Maximum length of a stored sentiment label, in characters.
pub const SENTIMENT_MAX_CHARS: usize = 50;

/// Substring that makes the mock provider simulate an upstream outage.
pub const MOCK_FAILURE_SENTINEL: &str = "FAIL_LLM";
