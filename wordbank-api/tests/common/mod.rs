//! Shared helpers for router-level tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use wordbank_api::{create_api_router, ApiConfig, DbClient};
use wordbank_test_utils::StubGateway;

/// Full application router over the given stub.
pub fn app(stub: &StubGateway) -> Router {
    let db = DbClient::new(Arc::new(stub.clone()));
    create_api_router(db, &ApiConfig::default())
}

/// Send one request through a fresh router and decode the JSON body.
///
/// Non-JSON bodies (e.g. `pong`) come back as a JSON string.
pub async fn send(
    stub: &StubGateway,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    dispatch(stub, request).await
}

/// POST a raw JSON-typed body, for payloads `serde_json::Value` cannot hold.
pub async fn send_raw(stub: &StubGateway, uri: &str, body: &'static str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();

    dispatch(stub, request).await
}

/// POST a body without any content type.
pub async fn send_untyped(stub: &StubGateway, uri: &str, body: &'static str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::from(body))
        .unwrap();

    dispatch(stub, request).await
}

async fn dispatch(stub: &StubGateway, request: Request<Body>) -> (StatusCode, Value) {
    let response = app(stub).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, json)
}

pub async fn get(stub: &StubGateway, uri: &str) -> (StatusCode, Value) {
    send(stub, Method::GET, uri, None).await
}

pub async fn post(stub: &StubGateway, uri: &str, body: Value) -> (StatusCode, Value) {
    send(stub, Method::POST, uri, Some(body)).await
}

pub async fn delete(stub: &StubGateway, uri: &str) -> (StatusCode, Value) {
    send(stub, Method::DELETE, uri, None).await
}
