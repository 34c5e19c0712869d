use chschema_catalog::{
    CatalogError, RawEntityDefinition, RawLink, RawPage, SnapshotSource, fetch_all_pages,
    fetch_definitions,
};

fn entity(name: &str) -> RawEntityDefinition {
    RawEntityDefinition {
        name: Some(name.to_string()),
        ..RawEntityDefinition::default()
    }
}

fn page(names: &[&str], next: Option<&str>) -> RawPage {
    RawPage {
        items: names.iter().map(|name| entity(name)).collect(),
        total_items: Some(3),
        returned_items: Some(names.len() as i64),
        next: next.map(|href| RawLink {
            href: Some(href.to_string()),
        }),
    }
}

#[tokio::test]
async fn follows_next_links_until_exhausted() {
    let source = SnapshotSource::new(vec![
        page(&["M.Asset", "M.File"], Some("https://hub.example/api/entitydefinitions?skip=2")),
        page(&["User"], None),
    ]);

    let pages = fetch_all_pages(&source).await.expect("fetch pages");
    assert_eq!(pages.len(), 2);

    let definitions = fetch_definitions(&source).await.expect("fetch definitions");
    let names: Vec<&str> = definitions
        .iter()
        .map(|definition| definition.name.as_str())
        .collect();
    assert_eq!(names, vec!["M.Asset", "M.File", "User"]);
}

#[tokio::test]
async fn stops_on_empty_page_even_with_next_link() {
    let source = SnapshotSource::new(vec![
        page(&["M.Asset"], Some("https://hub.example/p2")),
        page(&[], Some("https://hub.example/p3")),
        page(&["Never"], None),
    ]);

    let pages = fetch_all_pages(&source).await.expect("fetch pages");
    assert_eq!(pages.len(), 2);
}

#[tokio::test]
async fn empty_snapshot_yields_single_empty_page() {
    let source = SnapshotSource::default();

    let definitions = fetch_definitions(&source).await.expect("fetch definitions");
    assert!(definitions.is_empty());
}

#[tokio::test]
async fn dangling_next_link_is_an_error() {
    let source = SnapshotSource::new(vec![page(&["M.Asset"], Some("https://hub.example/p2"))]);

    let err = fetch_all_pages(&source).await.unwrap_err();
    assert!(matches!(err, CatalogError::PageNotFound(_)));
}

#[tokio::test]
async fn invalid_definition_is_rejected_at_ingestion() {
    let source = SnapshotSource::new(vec![RawPage {
        items: vec![RawEntityDefinition::default()],
        ..RawPage::default()
    }]);

    let err = fetch_definitions(&source).await.unwrap_err();
    assert!(matches!(err, CatalogError::Core(_)));
}

#[test]
fn snapshot_accepts_single_page_or_array() {
    let single = SnapshotSource::from_json(r#"{"items":[{"name":"M.Asset"}]}"#).expect("page");
    assert_eq!(single.pages().len(), 1);

    let many = SnapshotSource::from_json(r#"[{"items":[]},{"items":[{"name":"A"}]}]"#)
        .expect("pages");
    assert_eq!(many.pages().len(), 2);
}

#[tokio::test]
async fn repeated_next_link_is_a_paging_loop() {
    let source = SnapshotSource::new(vec![
        page(&["M.Asset"], Some("https://hub.example/p2")),
        page(&["M.File"], Some("https://hub.example/p2")),
    ]);

    let err = fetch_all_pages(&source).await.unwrap_err();
    assert!(matches!(err, CatalogError::PagingLoop(href) if href == "https://hub.example/p2"));
}
