//! Testing utilities for the showcase workspace
//!
//! Shared fixtures and request helpers for driving the router in-process.

#![allow(missing_docs)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use showcase_core::{Latency, ShowcaseConfig};
use showcase_server::ServerConfig;
use tower::ServiceExt;

pub const TEST_PREFIX: &str = "/api/java25";

/// Demo settings with no simulated delays
pub fn fast_showcase() -> ShowcaseConfig {
    ShowcaseConfig::new().with_latency(Latency::zero())
}

/// Server settings with no simulated delays
pub fn fast_config() -> ServerConfig {
    ServerConfig::new().with_showcase(fast_showcase())
}

/// Router over fresh components with no simulated delays
pub fn test_router() -> Router {
    showcase_server::app(fast_config())
}

/// Full path under the default prefix
pub fn api_path(path: &str) -> String {
    format!("{TEST_PREFIX}{path}")
}

pub fn get_request(path: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Send one request through `router`, returning status and body text
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// `send`, decoding the body as JSON
pub async fn send_json(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(router, request).await;
    (status, serde_json::from_str(&body).unwrap())
}
