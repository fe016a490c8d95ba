use super::*;

use axum::Json;
use axum::Router;
use axum::extract::{Multipart, Path as UrlPath};
use axum::routing::{patch, post};
use serde_json::{Value, json};

use crate::test_helpers::{logged_in_client, serve};

fn ecard() -> Ecard {
    Ecard {
        id: 5,
        name: "Thanksgiving".to_owned(),
        category: 10,
        image: None,
        greeting: "Happy Thanksgiving".to_owned(),
        html: "<p>Dear *title1*</p><small>*email1*</small>".to_owned(),
        date: None,
        is_active: true,
    }
}

async fn send_handler(UrlPath(id): UrlPath<i64>, Json(body): Json<Value>) -> Json<Value> {
    let messages = body["messages"].as_array().cloned().unwrap_or_default();
    let first = messages.first().map(|m| m["html"].as_str().unwrap_or_default().to_owned());
    Json(json!({ "queued": messages.len(), "detail": format!("{id}:{}", first.unwrap_or_default()) }))
}

async fn update_handler(UrlPath(id): UrlPath<i64>, mut form: Multipart) -> Json<Value> {
    let mut names = Vec::new();
    while let Some(field) = form.next_field().await.unwrap() {
        names.push(field.name().unwrap_or_default().to_owned());
    }
    Json(json!({ "id": id, "name": names.join(","), "category": 10 }))
}

fn router() -> Router {
    Router::new()
        .route("/api/ecards/{id}/send/", post(send_handler))
        .route("/api/ecards/{id}/", patch(update_handler))
        .route(
            "/api/ecards/{id}/distribute/",
            post(|| async { Json(json!({ "queued": 120 })) }),
        )
}

#[test]
fn personalize_renders_one_copy_per_recipient() {
    let recipients = vec![
        Recipient::new("Jane Doe", "jane@x.com"),
        Recipient::new("Sam Lee", "sam@x.com"),
    ];

    let messages = personalize(&ecard(), &recipients, &PlaceholderSet::default());
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].html, "<p>Dear Jane Doe</p><small>jane@x.com</small>");
    assert_eq!(messages[1].email, "sam@x.com");
    assert_eq!(messages[1].html, "<p>Dear Sam Lee</p><small>sam@x.com</small>");
}

#[test]
fn filter_skips_unset_fields() {
    let filter = EcardFilter { category: Some(3), ..EcardFilter::default() };
    let query = filter.to_query();
    assert_eq!(query.get("category"), Some("3"));
    assert_eq!(query.get("search"), None);
    assert_eq!(query.get("is_active"), None);
}

#[tokio::test]
async fn send_personalized_posts_rendered_messages() {
    let base = serve(router()).await;
    let client = logged_in_client(&base);
    let recipients = vec![Recipient::new("Jane Doe", "jane@x.com")];

    let response = send_personalized(&client, &ecard(), &recipients, &PlaceholderSet::default())
        .await
        .unwrap();
    assert_eq!(response.queued, 1);
    assert_eq!(
        response.detail.as_deref(),
        Some("5:<p>Dear Jane Doe</p><small>jane@x.com</small>")
    );
}

#[tokio::test]
async fn update_sends_only_set_fields_as_multipart() {
    let base = serve(router()).await;
    let client = logged_in_client(&base);
    let input = EcardInput { greeting: Some("Hello".to_owned()), is_active: Some(false), ..EcardInput::default() };

    let updated = update(&client, 5, &input, None).await.unwrap();
    assert_eq!(updated.name, "greeting,is_active");
}

#[tokio::test]
async fn distribute_reports_queued_count() {
    let base = serve(router()).await;
    let client = logged_in_client(&base);

    let response = distribute(&client, 5).await.unwrap();
    assert_eq!(response.queued, 120);
    assert_eq!(response.detail, None);
}
