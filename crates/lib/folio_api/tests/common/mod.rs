//! Shared helpers for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use folio_api::AppState;
use folio_core::config::{
    ADMIN_PASSWORD, ADMIN_USERNAME, API_SECRET, APPLICATION_URL, MapConfigSource,
};
use folio_core::store::MemoryStore;
use tower::ServiceExt;

pub const APP_URL: &str = "https://masonpohler.com";

/// Router over an empty in-memory store, plus the config behind it.
pub fn app() -> (Router, Arc<MapConfigSource>) {
    let config = Arc::new(MapConfigSource::from_pairs([
        (ADMIN_USERNAME, "root"),
        (ADMIN_PASSWORD, "root"),
        (API_SECRET, "secret"),
        (APPLICATION_URL, APP_URL),
    ]));
    let state = AppState::new(Arc::new(MemoryStore::new()), config.clone());
    (folio_api::router(state), config)
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.expect("request")
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_bytes(resp: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body")
        .to_vec()
}

pub async fn body_json(resp: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(resp).await).expect("parse JSON")
}

pub async fn body_text(resp: Response<Body>) -> String {
    String::from_utf8(body_bytes(resp).await).expect("utf-8 body")
}

/// Log in as the configured admin and return the raw token.
pub async fn admin_token(app: &Router) -> String {
    let resp = send(
        app,
        json_request("POST", "/login", None, r#"{"username":"root","password":"root"}"#),
    )
    .await;
    assert_eq!(resp.status(), 200);
    body_text(resp).await
}
