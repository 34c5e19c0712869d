use std::collections::HashSet;

use chschema_core::EntityDefinition;

use crate::error::{CatalogError, CatalogResult};
use crate::mapper::map_pages;
use crate::source::{CatalogSource, PageRequest};
use crate::wire::RawPage;

/// Follow `next` links until the catalog is exhausted.
///
/// Paging stops after a page with no items or without a `next` link. Every
/// page fetched, including the last one, is returned. A `next` link seen
/// twice is an error rather than an endless loop.
pub async fn fetch_all_pages<S>(source: &S) -> CatalogResult<Vec<RawPage>>
where
    S: CatalogSource + ?Sized,
{
    let mut pages = Vec::new();
    let mut request = PageRequest::First;
    let mut visited = HashSet::new();

    loop {
        let page = source.fetch_page(&request).await?;
        let items = page.items.len();
        let next = page.next_href().map(str::to_string);

        tracing::info!(
            event = "page_fetched",
            source = source.kind(),
            page = pages.len() + 1,
            items,
            total_items = page.total_items
        );
        pages.push(page);

        match next {
            Some(href) if items > 0 => {
                if !visited.insert(href.clone()) {
                    return Err(CatalogError::PagingLoop(href));
                }
                request = PageRequest::Next(href);
            }
            _ => break,
        }
    }

    Ok(pages)
}

/// Fetch all pages and ingest them into entity definitions.
pub async fn fetch_definitions<S>(source: &S) -> CatalogResult<Vec<EntityDefinition>>
where
    S: CatalogSource + ?Sized,
{
    let pages = fetch_all_pages(source).await?;
    Ok(map_pages(&pages)?)
}
