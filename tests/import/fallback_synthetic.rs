use crate::common::{self, API_KEY, IDEA_ID};
use idemark_import::{ImportError, ImportRequest, ImportStrategy, import_idea};

fn idea_path() -> String {
    format!("/idea/{IDEA_ID}")
}

#[tokio::test]
async fn discovery_failure_falls_back_to_page_metadata() {
    let server = common::setup_server();
    let root = common::mock_page(&server, "/", "<html><head></head><body></body></html>");
    let page = common::mock_page(
        &server,
        &idea_path(),
        &common::og_page("Drone Seeds", "Reforestation by air", "https://cdn/seed.jpg"),
    );

    let client = common::client_for(&server, ImportStrategy::DirectThenScrape);
    let req = ImportRequest::new(common::local_link(&server, &idea_path()));

    let res = import_idea(&client, &req).await.unwrap();
    root.assert();
    page.assert();

    assert_eq!(res.title, "Drone Seeds");
    assert_eq!(res.description, "Reforestation by air");
    assert_eq!(res.image, "https://cdn/seed.jpg");
}

#[tokio::test]
async fn upstream_rejection_retries_once_then_scrapes() {
    let server = common::setup_server();
    let (root, _bundle) = common::mock_discovery(&server);
    let record = common::mock_record(&server, IDEA_ID, API_KEY, 500, "boom");
    let page = common::mock_page(
        &server,
        &idea_path(),
        &common::og_page("From page", "", ""),
    );

    let client = common::client_for(&server, ImportStrategy::DirectThenScrape);
    let req = ImportRequest::new(common::local_link(&server, &idea_path()));

    let res = import_idea(&client, &req).await.unwrap();
    root.assert_hits(2);
    record.assert_hits(2);
    page.assert();
    assert_eq!(res.title, "From page");
    assert_eq!(res.description, "");
}

#[tokio::test]
async fn missing_record_does_not_fall_back() {
    let server = common::setup_server();
    let (_root, _bundle) = common::mock_discovery(&server);
    let record = common::mock_record(&server, IDEA_ID, API_KEY, 200, "[]");
    let page = common::mock_page(
        &server,
        &idea_path(),
        &common::og_page("Idestrim", "Share ideas", ""),
    );

    let client = common::client_for(&server, ImportStrategy::DirectThenScrape);
    let req = ImportRequest::new(common::local_link(&server, &idea_path()));

    let err = import_idea(&client, &req).await.unwrap_err();
    record.assert();
    assert_eq!(page.hits(), 0);
    assert!(matches!(err, ImportError::RecordNotFound { .. }), "{err:?}");
    assert_eq!(err.http_status(), 404);
}

#[tokio::test]
async fn direct_only_surfaces_discovery_error() {
    let server = common::setup_server();
    let _root = common::mock_page(&server, "/", "<html></html>");
    let page = common::mock_page(
        &server,
        &idea_path(),
        &common::og_page("Unused", "", ""),
    );

    let client = common::client_for(&server, ImportStrategy::DirectOnly);
    let req = ImportRequest::new(common::local_link(&server, &idea_path()));

    let err = import_idea(&client, &req).await.unwrap_err();
    assert!(matches!(err, ImportError::ConfigDiscovery(_)), "{err:?}");
    assert_eq!(page.hits(), 0);
}

#[tokio::test]
async fn both_paths_failing_reports_scrape_error() {
    let server = common::setup_server();
    let _root = common::mock_page(&server, "/", "<html></html>");
    let _page = common::mock_page(&server, &idea_path(), "<html><body><div id=\"root\"></div></body></html>");

    let client = common::client_for(&server, ImportStrategy::DirectThenScrape);
    let req = ImportRequest::new(common::local_link(&server, &idea_path()));

    let err = import_idea(&client, &req).await.unwrap_err();
    assert!(matches!(err, ImportError::NoExtractableContent), "{err:?}");
}
