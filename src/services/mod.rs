//! Resource service modules, one per backend collection.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each module exposes typed functions that build query parameters from
//! their filter objects and call [`ApiClient`]. Nothing here retries or maps
//! errors; callers get exactly what the client returned.

pub mod auth;
pub mod contacts;
pub mod cron_jobs;
pub mod customer_templates;
pub mod default_templates;
pub mod distributions;
pub mod ecards;
pub mod email_history;
pub mod newsletters;
pub mod social_icons;
pub mod templates;
pub mod users;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::net::client::{ApiClient, ApiRequest};
use crate::net::query::ToQuery;
use crate::net::types::{ListResponse, Paginated};

/// A REST collection rooted at `path` (with trailing slash).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resource {
    path: &'static str,
}

impl Resource {
    #[must_use]
    pub const fn new(path: &'static str) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn collection(&self) -> &'static str {
        self.path
    }

    #[must_use]
    pub fn item(&self, id: i64) -> String {
        format!("{}{id}/", self.path)
    }

    /// Detail route such as `/api/cron-jobs/4/start/`.
    #[must_use]
    pub fn action(&self, id: i64, action: &str) -> String {
        format!("{}{id}/{action}/", self.path)
    }

    /// # Errors
    ///
    /// Propagates [`ApiClient::send_json`] errors.
    pub async fn list<T: DeserializeOwned>(
        &self,
        client: &ApiClient,
        query: &impl ToQuery,
    ) -> Result<Paginated<T>, ApiError> {
        let request = ApiRequest::get(self.path).query(query.to_query());
        let response: ListResponse<T> = client.send_json(&request).await?;
        Ok(response.into_page())
    }

    /// # Errors
    ///
    /// Propagates [`ApiClient::send_json`] errors.
    pub async fn get<T: DeserializeOwned>(&self, client: &ApiClient, id: i64) -> Result<T, ApiError> {
        client.send_json(&ApiRequest::get(self.item(id))).await
    }

    /// # Errors
    ///
    /// Propagates [`ApiClient::send_json`] errors.
    pub async fn create<T, B>(&self, client: &ApiClient, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        client.send_json(&ApiRequest::post(self.path).json(body)?).await
    }

    /// Partial update (`PATCH`).
    ///
    /// # Errors
    ///
    /// Propagates [`ApiClient::send_json`] errors.
    pub async fn update<T, B>(&self, client: &ApiClient, id: i64, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        client.send_json(&ApiRequest::patch(self.item(id)).json(body)?).await
    }

    /// # Errors
    ///
    /// Propagates [`ApiClient::send_empty`] errors.
    pub async fn delete(&self, client: &ApiClient, id: i64) -> Result<(), ApiError> {
        client.send_empty(&ApiRequest::delete(self.item(id))).await
    }

    /// `POST` to a detail action with an optional JSON body.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiClient::send_json`] errors.
    pub async fn post_action<T, B>(&self, client: &ApiClient, id: i64, action: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut request = ApiRequest::post(self.action(id, action));
        if let Some(body) = body {
            request = request.json(body)?;
        }
        client.send_json(&request).await
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
