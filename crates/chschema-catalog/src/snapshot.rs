use std::fs;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{CatalogError, CatalogResult};
use crate::source::{CatalogSource, PageRequest};
use crate::wire::RawPage;

/// Catalog source backed by previously fetched pages.
#[derive(Debug, Clone, Default)]
pub struct SnapshotSource {
    pages: Vec<RawPage>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Pages(Vec<RawPage>),
    Page(RawPage),
}

impl SnapshotSource {
    pub fn new(pages: Vec<RawPage>) -> Self {
        Self { pages }
    }

    /// Load a JSON dump holding either an array of pages or a single page.
    pub fn from_path(path: &Path) -> CatalogResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> CatalogResult<Self> {
        let file: SnapshotFile = serde_json::from_str(content)?;
        let pages = match file {
            SnapshotFile::Pages(pages) => pages,
            SnapshotFile::Page(page) => vec![page],
        };
        Ok(Self { pages })
    }

    pub fn pages(&self) -> &[RawPage] {
        &self.pages
    }
}

#[async_trait]
impl CatalogSource for SnapshotSource {
    fn kind(&self) -> &'static str {
        "snapshot"
    }

    async fn fetch_page(&self, request: &PageRequest) -> CatalogResult<RawPage> {
        match request {
            PageRequest::First => Ok(self.pages.first().cloned().unwrap_or_default()),
            PageRequest::Next(href) => self
                .pages
                .iter()
                .position(|page| page.next_href() == Some(href.as_str()))
                .and_then(|idx| self.pages.get(idx + 1))
                .cloned()
                .ok_or_else(|| CatalogError::PageNotFound(href.clone())),
        }
    }
}
