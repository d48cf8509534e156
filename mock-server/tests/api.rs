use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echoed, Item};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- items ---

#[tokio::test]
async fn create_item_returns_201() {
    let resp = app()
        .oneshot(json_request("POST", "/items", r#"{"name":"Notebook"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let item: Item = body_json(resp).await;
    assert_eq!(item.name, "Notebook");
    assert!(!item.id.is_empty());
}

#[tokio::test]
async fn create_item_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/items", r#"{"not_name":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn get_missing_item_returns_json_404() {
    let resp = app().oneshot(empty_request("GET", "/items/42")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"], "item not found");
}

// --- echo ---

#[tokio::test]
async fn echo_reflects_request() {
    let req = Request::builder()
        .method("PATCH")
        .uri("/echo/users/7?tab=notes&page=2")
        .header(http::header::CONTENT_TYPE, "application/json")
        .header("token", "abc")
        .body(r#"{"bio":"hi"}"#.to_string())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echoed: Echoed = body_json(resp).await;
    assert_eq!(echoed.method, "PATCH");
    assert_eq!(echoed.path, "/echo/users/7");
    assert_eq!(echoed.query.as_deref(), Some("tab=notes&page=2"));
    assert_eq!(echoed.token.as_deref(), Some("abc"));
    assert_eq!(echoed.content_type.as_deref(), Some("application/json"));
    assert_eq!(echoed.body, serde_json::json!({"bio": "hi"}));
}

#[tokio::test]
async fn echo_without_body_reports_null() {
    let resp = app().oneshot(empty_request("GET", "/echo/x")).await.unwrap();
    let echoed: Echoed = body_json(resp).await;
    assert_eq!(echoed.body, Value::Null);
    assert_eq!(echoed.query, None);
    assert_eq!(echoed.token, None);
}

// --- fixtures for failure paths and capabilities ---

#[tokio::test]
async fn plain_is_not_json() {
    let resp = app().oneshot(empty_request("GET", "/plain")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body_bytes(resp).await;
    assert!(serde_json::from_slice::<Value>(&bytes).is_err());
}

#[tokio::test]
async fn generate_echoes_prompt() {
    let resp = app()
        .oneshot(json_request("POST", "/generate", r#"{"prompt":"explain recursion"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["text"], "generated: explain recursion");
}

#[tokio::test]
async fn generate_without_prompt_returns_400() {
    let resp = app()
        .oneshot(json_request("POST", "/generate", "{}"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn jobs_returns_202_with_id() {
    let resp = app()
        .oneshot(json_request("POST", "/jobs", r#"{"script":"hello"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    let body: Value = body_json(resp).await;
    assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(body["status"], "queued");
}
