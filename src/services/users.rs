//! Staff and customer user accounts, including per-user settings.

use tracing::debug;

use super::Resource;
use crate::error::ApiError;
use crate::net::client::{ApiClient, ApiRequest};
use crate::net::query::ListQuery;
use crate::net::types::{Paginated, User, UserInput};
use crate::state::settings::UserSettings;

pub const USERS: Resource = Resource::new("/api/users/");

/// # Errors
///
/// Propagates client errors.
pub async fn list(client: &ApiClient, query: &ListQuery) -> Result<Paginated<User>, ApiError> {
    USERS.list(client, query).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn get(client: &ApiClient, id: i64) -> Result<User, ApiError> {
    USERS.get(client, id).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn create(client: &ApiClient, input: &UserInput) -> Result<User, ApiError> {
    USERS.create(client, input).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn update(client: &ApiClient, id: i64, input: &UserInput) -> Result<User, ApiError> {
    USERS.update(client, id, input).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    USERS.delete(client, id).await
}

/// Replace the user's settings document and return what the server stored.
///
/// # Errors
///
/// Propagates client errors.
pub async fn update_settings(client: &ApiClient, id: i64, settings: &UserSettings) -> Result<UserSettings, ApiError> {
    debug!(user_id = id, "users: saving settings");
    client
        .send_json(&ApiRequest::patch(USERS.action(id, "settings")).json(settings)?)
        .await
}
