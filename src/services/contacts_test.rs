use super::*;

use std::collections::HashMap;

use axum::Json;
use axum::Router;
use axum::extract::{Multipart, Path as UrlPath, Query};
use axum::routing::{get, patch};
use serde_json::{Value, json};

use crate::test_helpers::{capture_logs, logged_in_client, serve};

fn contact_json(id: i64, email: &str) -> Value {
    json!({ "id": id, "email": email, "customer_type": "contact" })
}

/// Two pages of contacts; echoes the query it saw on every entry's `notes`.
async fn list_contacts(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let page = params.get("page").map_or("1", String::as_str);
    let seen = serde_json::to_string(&params).unwrap();
    let mut first = contact_json(1, "a@x.com");
    first["notes"] = Value::String(seen);
    match page {
        "1" => Json(json!({ "count": 3, "next": "next-page", "previous": null, "results": [first, contact_json(2, "b@x.com")] })),
        _ => Json(json!({ "count": 3, "next": null, "previous": "prev", "results": [contact_json(3, "c@x.com")] })),
    }
}

async fn create_contact(mut form: Multipart) -> Json<Value> {
    let mut names = Vec::new();
    let mut email = String::new();
    while let Some(field) = form.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_owned();
        let value = field.text().await.unwrap();
        if name == "email" {
            email = value;
        }
        names.push(name);
    }
    let mut contact = contact_json(10, &email);
    contact["notes"] = Value::String(names.join(","));
    Json(contact)
}

async fn patch_contact(UrlPath(id): UrlPath<i64>, Json(body): Json<Value>) -> Json<Value> {
    let mut contact = contact_json(id, "a@x.com");
    contact["notes"] = Value::String(body.to_string());
    Json(contact)
}

fn router() -> Router {
    Router::new()
        .route("/api/contacts/", get(list_contacts).post(create_contact))
        .route("/api/contacts/{id}/", patch(patch_contact))
}

#[test]
fn filter_renders_typed_values() {
    let filter = ContactFilter {
        customer_type: Some(CustomerType::Both),
        send_status: Some(SendStatus::DontSend),
        optout: Some(false),
        search: Some(String::new()),
        ..ContactFilter::default()
    };
    let params = filter.to_query();
    assert_eq!(params.get("customer_type"), Some("both"));
    assert_eq!(params.get("send_status"), Some("dont_send"));
    assert_eq!(params.get("optout"), Some("false"));
    assert_eq!(params.get("search"), None);
}

#[tokio::test]
async fn list_sends_only_non_empty_filters() {
    let base = serve(router()).await;
    let client = logged_in_client(&base);
    let filter = ContactFilter {
        search: Some("jane".to_owned()),
        newsletter_version: Some("  ".to_owned()),
        ..ContactFilter::default()
    };

    let page = list(&client, &filter).await.unwrap();
    let seen: HashMap<String, String> = serde_json::from_str(page.results[0].notes.as_deref().unwrap()).unwrap();
    assert_eq!(seen.get("search").map(String::as_str), Some("jane"));
    assert!(!seen.contains_key("newsletter_version"));
}

#[tokio::test]
async fn fetch_all_walks_every_page() {
    let base = serve(router()).await;
    let client = logged_in_client(&base);

    let all = fetch_all(&client, &ContactFilter::default()).await.unwrap();
    let emails: Vec<&str> = all.iter().map(|c| c.email.as_str()).collect();
    assert_eq!(emails, vec!["a@x.com", "b@x.com", "c@x.com"]);
}

#[tokio::test]
async fn page_limit_warns_when_more_pages_remain() {
    let base = serve(router()).await;
    let client = logged_in_client(&base);
    let (_guard, logs) = capture_logs();

    let all = fetch_pages(&client, &ContactFilter::default(), 1).await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(logs.contents().contains("contact listing truncated at page limit"), "{}", logs.contents());

    let all = fetch_pages(&client, &ContactFilter::default(), 2).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(logs.contents().matches("truncated").count(), 1);
}

#[tokio::test]
async fn create_posts_multipart_form() {
    let base = serve(router()).await;
    let client = logged_in_client(&base);
    let contact = NewContact {
        first_name: "Jane".to_owned(),
        last_name: "Doe".to_owned(),
        email: "jane@x.com".to_owned(),
        customer_type: Some(CustomerType::Partner),
        ..NewContact::default()
    };

    let created = create(&client, &contact, None).await.unwrap();
    assert_eq!(created.email, "jane@x.com");
    assert_eq!(created.notes.as_deref(), Some("first_name,last_name,email,customer_type"));
}

#[tokio::test]
async fn create_reports_unreadable_photo() {
    let base = serve(router()).await;
    let client = logged_in_client(&base);

    let err = create(&client, &NewContact::default(), Some(std::path::Path::new("/nonexistent/photo.png")))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Upload { .. }));
}

#[tokio::test]
async fn update_field_patches_a_single_key() {
    let base = serve(router()).await;
    let client = logged_in_client(&base);

    let updated = update_field(&client, 5, &ContactField::Optout(true)).await.unwrap();
    assert_eq!(updated.id, 5);
    assert_eq!(updated.notes.as_deref(), Some(r#"{"optout":true}"#));
}
