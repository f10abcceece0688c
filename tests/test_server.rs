use datavault::server::{preview_response, serve_on, PREVIEW_ROUTE};
use datavault::{LinkPreviewer, PreviewRequest, PreviewResponse};
use reqwest::StatusCode;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

/// Start the server on an ephemeral port and return its base URL
async fn spawn_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let previewer = LinkPreviewer::builder()
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap();

    tokio::spawn(async move {
        let _ = serve_on(listener, previewer, &["*".to_string()]).await;
    });

    format!("http://{addr}")
}

async fn post_preview(base: &str, body: serde_json::Value) -> (StatusCode, PreviewResponse) {
    let response = reqwest::Client::new()
        .post(format!("{base}{PREVIEW_ROUTE}"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn test_missing_url_returns_400() {
    let base = spawn_server().await;

    for body in [
        serde_json::json!({}),
        serde_json::json!({"url": ""}),
        serde_json::json!({"url": null}),
    ] {
        let (status, response) = post_preview(&base, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.error.as_deref(), Some("URL is required"));
    }
}

#[tokio::test]
async fn test_malformed_body_returns_400() {
    let base = spawn_server().await;

    let response = reqwest::Client::new()
        .post(format!("{base}{PREVIEW_ROUTE}"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: PreviewResponse = response.json().await.unwrap();
    assert!(!body.success);
    assert!(body.error.unwrap().starts_with("Invalid request"));
}

#[tokio::test]
async fn test_preview_returns_200_with_data() {
    let mut upstream = mockito::Server::new_async().await;
    let _m = upstream
        .mock("GET", "/post")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(r#"<html><head><meta property="og:title" content="Hello"></head></html>"#)
        .create_async()
        .await;

    let base = spawn_server().await;
    let (status, response) = post_preview(
        &base,
        serde_json::json!({"url": format!("{}/post", upstream.url())}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(response.success);
    let data = response.data.unwrap();
    assert_eq!(data.title.as_deref(), Some("Hello"));
    assert_eq!(data.domain, "127.0.0.1");
}

#[tokio::test]
async fn test_unreachable_target_is_still_success() {
    let base = spawn_server().await;
    let (status, response) =
        post_preview(&base, serde_json::json!({"url": "http://127.0.0.1:1/x"})).await;

    assert_eq!(status, StatusCode::OK);
    assert!(response.success);
    assert!(response.error.is_none());
    let data = response.data.unwrap();
    assert!(data.title.is_none());
    assert!(data.description.is_none());
    assert!(data.image.is_none());
    assert_eq!(data.domain, "127.0.0.1");
    assert_eq!(data.url, "http://127.0.0.1:1/x");
}

#[tokio::test]
async fn test_health() {
    let base = spawn_server().await;
    let response = reqwest::get(format!("{base}/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_cors_preflight() {
    let base = spawn_server().await;
    let response = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, format!("{base}{PREVIEW_ROUTE}"))
        .header("origin", "https://app.example.com")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "authorization, content-type")
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn test_broken_response_stream_returns_500() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            // Promise far more body than is sent, then hang up
            let head = "HTTP/1.1 200 OK\r\n\
                        Content-Type: text/html\r\n\
                        Content-Length: 100000\r\n\r\n\
                        <html><head><title>Cut off";
            let _ = socket.write_all(head.as_bytes()).await;
            let _ = socket.flush().await;
            let _ = socket.shutdown().await;
        }
    });

    let previewer = LinkPreviewer::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    let request = PreviewRequest {
        url: Some(format!("http://{addr}/")),
    };

    let (status, response) = preview_response(&previewer, request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!response.success);
    assert!(response.data.is_none());
    assert!(response.error.is_some_and(|e| !e.is_empty()));
}
