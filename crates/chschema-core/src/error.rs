use thiserror::Error;

/// Core error type shared across chschema crates.
#[derive(Debug, Error)]
pub enum Error {
    /// An entity definition breaks the ingestion contract.
    #[error("invalid definition: {0}")]
    InvalidDefinition(String),
    /// Catch-all error for unexpected failures.
    #[error("other error: {0}")]
    Other(String),
}

/// Convenience alias for results returned by chschema crates.
pub type Result<T> = std::result::Result<T, Error>;
