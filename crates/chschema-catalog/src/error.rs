use thiserror::Error;

/// Errors raised while fetching or ingesting the entity catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status} from {url}: {body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("paging loop: next link {0} was already visited")]
    PagingLoop(String),
    #[error("page not found: {0}")]
    PageNotFound(String),
    #[error(transparent)]
    Core(#[from] chschema_core::Error),
}

/// Result type for catalog operations.
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
