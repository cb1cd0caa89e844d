/// How a failure should be surfaced to a caller.
///
/// Every [`AnalysisError`] falls into exactly one of these classes. API layers map them onto
/// their own status codes without needing to know each variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or empty input supplied by the caller. Nothing was staged.
    Validation,
    /// The analysis provider reported a failure. The batch was abandoned.
    Upstream,
    /// Anything else. The underlying cause must not be exposed to the caller.
    Internal,
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Upstream(String),

    #[error("invalid analysis record: {0}")]
    InvalidRecord(String),
    #[error("failed to open database: {0}")]
    DatabaseOpen(rusqlite::Error),
    #[error("failed to initialise database schema: {0}")]
    SchemaInit(rusqlite::Error),
    #[error("failed to begin transaction: {0}")]
    TransactionBegin(rusqlite::Error),
    #[error("failed to insert analysis record: {0}")]
    Insert(rusqlite::Error),
    #[error("failed to commit transaction: {0}")]
    TransactionCommit(rusqlite::Error),
    #[error("failed to query analysis records: {0}")]
    Query(rusqlite::Error),
    #[error("failed to serialize tag list: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize stored tag list for record {id}: {source}")]
    Deserialization {
        id: i64,
        #[source]
        source: serde_json::Error,
    },
    #[error("analysis store lock was poisoned")]
    StorePoisoned,
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::InvalidInput(_) => ErrorKind::Validation,
            AnalysisError::Upstream(_) => ErrorKind::Upstream,
            _ => ErrorKind::Internal,
        }
    }
}

pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;
