use async_trait::async_trait;

use crate::error::CatalogResult;
use crate::wire::RawPage;

/// Position in the paginated catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    First,
    /// Follow the `next` link of a previous page.
    Next(String),
}

/// Trait implemented by anything that can serve entity-definition pages.
#[async_trait]
pub trait CatalogSource {
    /// Returns the source identifier (e.g. `content-hub`).
    fn kind(&self) -> &'static str;

    /// Fetch a single page.
    async fn fetch_page(&self, request: &PageRequest) -> CatalogResult<RawPage>;
}
