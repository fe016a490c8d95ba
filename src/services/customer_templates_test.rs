use super::*;

use axum::Json;
use axum::Router;
use axum::extract::{Multipart, Path as UrlPath};
use axum::http::StatusCode;
use axum::routing::{delete as delete_route, post};
use serde_json::{Value, json};

use crate::net::types::RecipientType;
use crate::test_helpers::{logged_in_client, serve};

fn default_template() -> DefaultTemplate {
    DefaultTemplate {
        id: 12,
        name: "Spring Market Update".to_owned(),
        subject: "Spring is here".to_owned(),
        html: "<p>Hi *title1*</p>".to_owned(),
        category: Some(3),
        email_type: Some(1),
        is_active: true,
    }
}

async fn create_template(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "id": 40,
        "name": body["name"],
        "subject": body["subject"],
        "html": body["html"],
        "default_template": body["default_template"],
        "is_active": true,
    }))
}

async fn send_template(UrlPath(id): UrlPath<i64>, Json(body): Json<Value>) -> Json<Value> {
    let queued = body["emails"].as_array().map_or(0, Vec::len);
    Json(json!({ "queued": queued, "detail": format!("template {id} queued") }))
}

async fn upload_html_handler(UrlPath(id): UrlPath<i64>, mut form: Multipart) -> Json<Value> {
    let field = form.next_field().await.unwrap().unwrap();
    let name = field.name().unwrap().to_owned();
    let file_name = field.file_name().unwrap().to_owned();
    let html = field.text().await.unwrap();
    Json(json!({ "id": id, "name": format!("{name}:{file_name}"), "html": html }))
}

fn router() -> Router {
    Router::new()
        .route("/api/email/templates/", post(create_template))
        .route("/api/email/templates/{id}/send/", post(send_template))
        .route("/api/email/templates/{id}/upload-html/", post(upload_html_handler))
        .route(
            "/api/email/templates/{id}/attachments/{aid}/",
            delete_route(|| async { StatusCode::NO_CONTENT }),
        )
}

#[test]
fn clone_input_keeps_ancestry_and_content() {
    let input = clone_input(&default_template(), None);
    assert_eq!(input.name.as_deref(), Some("Spring Market Update"));
    assert_eq!(input.default_template, Some(12));
    assert_eq!(input.html.as_deref(), Some("<p>Hi *title1*</p>"));

    let renamed = clone_input(&default_template(), Some("My Spring"));
    assert_eq!(renamed.name.as_deref(), Some("My Spring"));
}

#[tokio::test]
async fn clone_from_default_creates_linked_template() {
    let base = serve(router()).await;
    let client = logged_in_client(&base);

    let created = clone_from_default(&client, &default_template(), Some("Mine")).await.unwrap();
    assert_eq!(created.name, "Mine");
    assert_eq!(created.default_template, Some(12));
    assert_eq!(created.subject, "Spring is here");
}

#[tokio::test]
async fn send_posts_resolved_recipients() {
    let base = serve(router()).await;
    let client = logged_in_client(&base);
    let request = SendRequest {
        recipient_type: RecipientType::Custom,
        emails: vec!["a@x.com".to_owned(), "b@x.com".to_owned()],
        subject: None,
    };

    let response = send(&client, 40, &request).await.unwrap();
    assert_eq!(response.queued, 2);
    assert_eq!(response.detail.as_deref(), Some("template 40 queued"));
}

#[tokio::test]
async fn upload_html_sends_file_part() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("promo.html");
    std::fs::write(&path, "<h1>Promo</h1>").unwrap();
    let base = serve(router()).await;
    let client = logged_in_client(&base);

    let updated = upload_html(&client, 40, &path).await.unwrap();
    assert_eq!(updated.name, "html_file:promo.html");
    assert_eq!(updated.html, "<h1>Promo</h1>");
}

#[tokio::test]
async fn remove_attachment_hits_nested_route() {
    let base = serve(router()).await;
    let client = logged_in_client(&base);

    remove_attachment(&client, 40, 7).await.unwrap();
}
