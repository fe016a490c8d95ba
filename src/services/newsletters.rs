//! Newsletters: CRUD and send.

use super::Resource;
use crate::error::ApiError;
use crate::net::client::ApiClient;
use crate::net::query::ListQuery;
use crate::net::types::{Newsletter, NewsletterInput, Paginated, SendRequest, SendResponse};

pub const NEWSLETTERS: Resource = Resource::new("/api/newsletters/");

/// # Errors
///
/// Propagates client errors.
pub async fn list(client: &ApiClient, query: &ListQuery) -> Result<Paginated<Newsletter>, ApiError> {
    NEWSLETTERS.list(client, query).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn get(client: &ApiClient, id: i64) -> Result<Newsletter, ApiError> {
    NEWSLETTERS.get(client, id).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn create(client: &ApiClient, input: &NewsletterInput) -> Result<Newsletter, ApiError> {
    NEWSLETTERS.create(client, input).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn update(client: &ApiClient, id: i64, input: &NewsletterInput) -> Result<Newsletter, ApiError> {
    NEWSLETTERS.update(client, id, input).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    NEWSLETTERS.delete(client, id).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn send(client: &ApiClient, id: i64, request: &SendRequest) -> Result<SendResponse, ApiError> {
    NEWSLETTERS.post_action(client, id, "send", Some(request)).await
}
