//! Social icons shown in email footers.

use super::Resource;
use crate::error::ApiError;
use crate::net::client::ApiClient;
use crate::net::query::ListQuery;
use crate::net::types::{Paginated, SocialIcon, SocialIconInput};

pub const SOCIAL_ICONS: Resource = Resource::new("/api/social-icons/");

/// # Errors
///
/// Propagates client errors.
pub async fn list(client: &ApiClient, query: &ListQuery) -> Result<Paginated<SocialIcon>, ApiError> {
    SOCIAL_ICONS.list(client, query).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn get(client: &ApiClient, id: i64) -> Result<SocialIcon, ApiError> {
    SOCIAL_ICONS.get(client, id).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn create(client: &ApiClient, input: &SocialIconInput) -> Result<SocialIcon, ApiError> {
    SOCIAL_ICONS.create(client, input).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn update(client: &ApiClient, id: i64, input: &SocialIconInput) -> Result<SocialIcon, ApiError> {
    SOCIAL_ICONS.update(client, id, input).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    SOCIAL_ICONS.delete(client, id).await
}
