//! Shared content-block library.

use super::Resource;
use crate::error::ApiError;
use crate::net::client::ApiClient;
use crate::net::query::ListQuery;
use crate::net::types::{Paginated, Template, TemplateInput};

pub const TEMPLATES: Resource = Resource::new("/api/templates/");

/// # Errors
///
/// Propagates client errors.
pub async fn list(client: &ApiClient, query: &ListQuery) -> Result<Paginated<Template>, ApiError> {
    TEMPLATES.list(client, query).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn get(client: &ApiClient, id: i64) -> Result<Template, ApiError> {
    TEMPLATES.get(client, id).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn create(client: &ApiClient, input: &TemplateInput) -> Result<Template, ApiError> {
    TEMPLATES.create(client, input).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn update(client: &ApiClient, id: i64, input: &TemplateInput) -> Result<Template, ApiError> {
    TEMPLATES.update(client, id, input).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    TEMPLATES.delete(client, id).await
}
