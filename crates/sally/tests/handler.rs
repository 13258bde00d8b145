use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use sally::{Config, Sally};
use tower::ServiceExt;

const CONFIG: &str = r#"
url: go.uber.org
packages:
  zap:
    repo: github.com/uber-go/zap
    description: Blazing fast, structured, leveled logging in Go.
  fx:
    repo: github.com/uber-go/fx
  net/metrics:
    repo: github.com/yarpc/metrics
  net/metrics/bucket:
    repo: github.com/yarpc/metrics-bucket
    branch: main
  café:
    repo: github.com/uber-go/cafe
"#;

fn app() -> Router {
    Sally::new(Config::from_yaml(CONFIG).expect("valid config")).router()
}

async fn call(method: Method, uri: &str) -> (StatusCode, String, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    let response = app().oneshot(request).await.expect("infallible");

    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (
        status,
        content_type,
        String::from_utf8(body.to_vec()).expect("utf-8"),
    )
}

#[tokio::test]
async fn package_path_serves_go_import_meta() {
    let (status, content_type, body) = call(Method::GET, "/zap").await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/html"), "{content_type}");
    assert!(body.contains(
        r#"<meta name="go-import" content="go.uber.org/zap git https://github.com/uber-go/zap">"#
    ));
    assert!(body.contains("https://github.com/uber-go/zap/tree/master{/dir}"));
    assert!(body.contains(r#"<a href="https://pkg.go.dev/go.uber.org/zap">"#));
}

#[tokio::test]
async fn subpackage_inherits_package_and_keeps_godoc_path() {
    let (status, _, body) = call(Method::GET, "/zap/zapcore?go-get=1").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"content="go.uber.org/zap git https://github.com/uber-go/zap""#));
    assert!(body.contains("url=https://pkg.go.dev/go.uber.org/zap/zapcore"));
}

#[tokio::test]
async fn nested_package_overrides_parent() {
    let (status, _, body) = call(Method::GET, "/net/metrics/bucket/internal").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(
        r#"content="go.uber.org/net/metrics/bucket git https://github.com/yarpc/metrics-bucket""#
    ));
    assert!(body.contains("https://github.com/yarpc/metrics-bucket/tree/main{/dir}"));
    assert!(body.contains("url=https://pkg.go.dev/go.uber.org/net/metrics/bucket/internal"));
}

#[tokio::test]
async fn root_lists_every_package() {
    let (status, _, body) = call(Method::GET, "/").await;

    assert_eq!(status, StatusCode::OK);
    for import_path in [
        "go.uber.org/fx",
        "go.uber.org/net/metrics",
        "go.uber.org/net/metrics/bucket",
        "go.uber.org/zap",
    ] {
        assert!(
            body.contains(&format!(r#"<div class="import-path">{import_path}</div>"#)),
            "missing {import_path}"
        );
    }
    assert!(body.contains("Blazing fast, structured, leveled logging in Go."));
}

#[tokio::test]
async fn directory_path_lists_only_its_subtree() {
    let (status, _, body) = call(Method::GET, "/net").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("go.uber.org/net/metrics</div>"));
    assert!(body.contains("go.uber.org/net/metrics/bucket</div>"));
    assert!(!body.contains("go.uber.org/zap"));
    assert!(!body.contains("go.uber.org/fx"));
}

#[tokio::test]
async fn unknown_path_get_renders_empty_index() {
    let (status, _, body) = call(Method::GET, "/unknown").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<th>Package</th>"));
    assert!(!body.contains("import-path"));
}

#[tokio::test]
async fn unknown_path_non_get_is_not_found() {
    let (status, _, _) = call(Method::POST, "/unknown").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = call(Method::HEAD, "/unknown/deeper").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_get_on_listable_path_still_renders_index() {
    let (status, _, body) = call(Method::POST, "/net").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("go.uber.org/net/metrics</div>"));
}

#[tokio::test]
async fn escaped_request_path_matches_unescaped_package() {
    let (status, _, body) = call(Method::GET, "/caf%C3%A9/sub").await;

    assert_eq!(status, StatusCode::OK);
    assert!(
        body.contains(
            r#"<meta name="go-import" content="go.uber.org/café git https://github.com/uber-go/cafe">"#
        ),
        "{body}"
    );
    assert!(body.contains("url=https://pkg.go.dev/go.uber.org/café/sub"));
    assert!(!body.contains("%C3%A9"));
}

#[tokio::test]
async fn escaped_separator_decodes_to_nested_path() {
    let (status, _, body) = call(Method::GET, "/net%2Fmetrics").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(
        r#"content="go.uber.org/net/metrics git https://github.com/yarpc/metrics""#
    ));
}
