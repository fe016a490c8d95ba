use super::*;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Json;
use axum::Router;
use axum::extract::Path as UrlPath;
use axum::routing::patch;
use serde_json::{Value, json};

use crate::net::types::RecipientType;
use crate::test_helpers::{logged_in_client, serve};

fn record(status: DistributionStatus) -> Distribution {
    Distribution {
        id: 4,
        ecard: None,
        newsletter: Some(2),
        recipient_type: RecipientType::Contacts,
        recipients: vec!["a@x.com".to_owned()],
        status,
        total_count: 1,
        sent_count: 0,
        failed_count: 0,
    }
}

fn distribution_json(id: i64, status: &str) -> Value {
    json!({ "id": id, "newsletter": 2, "recipient_type": "contacts", "status": status })
}

/// Echoes the requested status unless `force` is set.
fn router(calls: Arc<AtomicUsize>, force: Option<&'static str>) -> Router {
    Router::new().route(
        "/api/distributions/newsletters/{id}/",
        patch(move |UrlPath(id): UrlPath<i64>, Json(body): Json<Value>| {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                let status = force.map_or_else(|| body["status"].as_str().unwrap_or("pending").to_owned(), str::to_owned);
                Json(distribution_json(id, &status))
            }
        }),
    )
}

#[test]
fn resource_follows_kind() {
    assert_eq!(resource(DistributionKind::Ecard).collection(), "/api/distributions/ecards/");
    assert_eq!(resource(DistributionKind::Newsletter).item(3), "/api/distributions/newsletters/3/");
}

#[tokio::test]
async fn valid_transition_patches_and_applies() {
    let calls = Arc::new(AtomicUsize::new(0));
    let base = serve(router(calls.clone(), None)).await;
    let client = logged_in_client(&base);
    let mut tracker = DistributionTracker::new(record(DistributionStatus::Pending));

    let status = request_status(&client, DistributionKind::Newsletter, &mut tracker, DistributionStatus::InProgress)
        .await
        .unwrap();
    assert_eq!(status, DistributionStatus::InProgress);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn invalid_transition_never_reaches_server() {
    let calls = Arc::new(AtomicUsize::new(0));
    let base = serve(router(calls.clone(), None)).await;
    let client = logged_in_client(&base);
    let mut tracker = DistributionTracker::new(record(DistributionStatus::Completed));

    let err = request_status(&client, DistributionKind::Newsletter, &mut tracker, DistributionStatus::InProgress)
        .await
        .unwrap_err();
    assert!(matches!(err, StatusChangeError::Rejected(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(tracker.status(), DistributionStatus::Completed);
}

#[tokio::test]
async fn tracker_reflects_server_answer() {
    let calls = Arc::new(AtomicUsize::new(0));
    let base = serve(router(calls, Some("failed"))).await;
    let client = logged_in_client(&base);
    let mut tracker = DistributionTracker::new(record(DistributionStatus::InProgress));

    let status = request_status(&client, DistributionKind::Newsletter, &mut tracker, DistributionStatus::Sent)
        .await
        .unwrap();
    assert_eq!(status, DistributionStatus::Failed);
    assert_eq!(tracker.record().newsletter, Some(2));
}
