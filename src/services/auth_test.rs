use super::*;

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use serde_json::{Value, json};

use crate::net::session::{MemoryTokenStore, TokenStore};
use crate::test_helpers::{client_with_store, serve};

async fn login_handler(headers: HeaderMap, Json(body): Json<Value>) -> Result<Json<Value>, StatusCode> {
    if headers.contains_key("authorization") {
        return Err(StatusCode::BAD_REQUEST);
    }
    match body["password"].as_str() {
        Some("hunter2") => Ok(Json(json!({ "access": "acc", "refresh": "ref" }))),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

async fn me_handler(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some("Bearer acc") => Ok(Json(json!({ "id": 1, "email": "staff@x.com", "first_name": "Ada", "is_staff": true }))),
        _ => Err(StatusCode::FORBIDDEN),
    }
}

fn router() -> Router {
    Router::new()
        .route("/api/auth/login/", post(login_handler))
        .route("/api/auth/me/", get(me_handler))
}

#[tokio::test]
async fn login_stores_tokens_and_fetches_user() {
    let base = serve(router()).await;
    let store = Arc::new(MemoryTokenStore::new());
    let client = client_with_store(&base, store.clone());

    let user = login(&client, " staff@x.com ", "hunter2").await.unwrap();
    assert_eq!(user.display_name(), "Ada");

    let session = store.get().unwrap();
    assert_eq!(session.access, "acc");
    assert_eq!(session.refresh, "ref");
    assert_eq!(session.user.map(|u| u.id), Some(1));
    assert_eq!(cached_user(&client).map(|u| u.email), Some("staff@x.com".to_owned()));
}

#[tokio::test]
async fn bad_credentials_leave_store_empty() {
    let base = serve(router()).await;
    let store = Arc::new(MemoryTokenStore::new());
    let client = client_with_store(&base, store.clone());

    let err = login(&client, "staff@x.com", "wrong").await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 401, .. }));
    assert!(store.get().is_none());
}

#[tokio::test]
async fn logout_clears_session() {
    let base = serve(router()).await;
    let store = Arc::new(MemoryTokenStore::new());
    let client = client_with_store(&base, store.clone());
    login(&client, "staff@x.com", "hunter2").await.unwrap();

    logout(&client).unwrap();
    assert!(store.get().is_none());
    assert!(cached_user(&client).is_none());
}
