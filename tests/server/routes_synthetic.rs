use crate::common::{self, API_KEY, IDEA_ID};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use idemark_import::ImportStrategy;
use idemark_import::server::create_app;
use serde_json::{Value, json};
use tower::ServiceExt;

fn post_json(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn import_succeeds_with_data_envelope() {
    let server = common::setup_server();
    let (_root, _bundle) = common::mock_discovery(&server);
    let _record = common::mock_record(
        &server,
        IDEA_ID,
        API_KEY,
        200,
        r#"[{"id":"3fa85f64-5717-4562-b3fc-2c963f66afa6","title":"X","pitch_summary":"Y","thumbnail_url":"https://img/z.png","category":"AI"}]"#,
    );

    let app = create_app(common::client_for(&server, ImportStrategy::DirectThenScrape));
    let body = json!({ "url": format!("https://idestrim.site/idea/{IDEA_ID}") }).to_string();

    let resp = app.oneshot(post_json("/", &body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    assert_eq!(
        body_json(resp).await,
        json!({
            "success": true,
            "data": {"title": "X", "description": "Y", "image": "https://img/z.png", "tags": ["AI"]}
        })
    );
}

#[tokio::test]
async fn named_route_behaves_like_root() {
    let server = common::setup_server();
    let (_root, _bundle) = common::mock_discovery(&server);
    let _record = common::mock_record(&server, IDEA_ID, API_KEY, 200, r#"[{"title":"Named"}]"#);

    let app = create_app(common::client_for(&server, ImportStrategy::DirectOnly));
    let body = json!({ "url": format!("https://www.idestrim.site/idea/{IDEA_ID}") }).to_string();

    let resp = app
        .oneshot(post_json("/fetch-idestrim-post", &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["data"]["title"], "Named");
}

#[tokio::test]
async fn foreign_link_is_bad_request() {
    let server = common::setup_server();
    let (root, _bundle) = common::mock_discovery(&server);

    let app = create_app(common::client_for(&server, ImportStrategy::DirectThenScrape));
    let resp = app
        .oneshot(post_json("/", r#"{"url":"https://example.com/random"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await,
        json!({
            "success": false,
            "error": "Please provide a valid Idestrim link.",
            "code": "INVALID_LINK"
        })
    );
    assert_eq!(root.hits(), 0);
}

#[tokio::test]
async fn unreadable_body_is_bad_request() {
    let server = common::setup_server();
    let app = create_app(common::client_for(&server, ImportStrategy::DirectThenScrape));

    let resp = app.oneshot(post_json("/", "not json")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let v = body_json(resp).await;
    assert_eq!(v["success"], false);
    assert_eq!(v["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn missing_record_is_not_found() {
    let server = common::setup_server();
    let (_root, _bundle) = common::mock_discovery(&server);
    let _record = common::mock_record(&server, IDEA_ID, API_KEY, 200, "[]");

    let app = create_app(common::client_for(&server, ImportStrategy::DirectThenScrape));
    let body = json!({ "url": format!("https://idestrim.site/idea/{IDEA_ID}") }).to_string();

    let resp = app.oneshot(post_json("/", &body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(resp).await,
        json!({
            "success": false,
            "error": "Post not found. Make sure the link is correct and the post is public.",
            "code": "IMPORT_FAILED"
        })
    );
}

#[tokio::test]
async fn preflight_is_answered_without_body() {
    let server = common::setup_server();
    let app = create_app(common::client_for(&server, ImportStrategy::DirectThenScrape));

    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/")
        .header(header::ORIGIN, "https://idestrim.site")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "apikey, content-type")
        .body(Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let headers = resp.headers();
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    let allowed = headers
        .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();
    assert!(allowed.contains("apikey"), "{allowed}");
    assert!(allowed.contains("x-client-info"), "{allowed}");

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn bare_options_is_no_content() {
    let server = common::setup_server();
    let app = create_app(common::client_for(&server, ImportStrategy::DirectThenScrape));

    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/fetch-idestrim-post")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn health_check() {
    let server = common::setup_server();
    let app = create_app(common::client_for(&server, ImportStrategy::DirectThenScrape));

    let req = Request::builder()
        .uri("/healthz")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"ok");
}
