//! Platform default email templates: CRUD, distribute and server preview.

use serde::Serialize;

use super::Resource;
use crate::error::ApiError;
use crate::net::client::ApiClient;
use crate::net::query::{PageRequest, QueryParams, ToQuery};
use crate::net::types::{DefaultTemplate, DefaultTemplateInput, Paginated, PreviewResponse, RecipientType, SendResponse};

pub const DEFAULT_TEMPLATES: Resource = Resource::new("/api/email/default-templates/");

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultTemplateFilter {
    pub search: Option<String>,
    pub category: Option<u16>,
    pub email_type: Option<u16>,
    pub is_active: Option<bool>,
    pub page: PageRequest,
}

impl ToQuery for DefaultTemplateFilter {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("search", self.search.as_deref())
            .push_opt("category", self.category)
            .push_opt("email_type", self.email_type)
            .push_opt("is_active", self.is_active)
            .merge(self.page.to_query())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributeRequest {
    pub recipient_type: RecipientType,
    /// Resolved addresses; empty lets the server resolve the recipient type.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<String>,
}

/// Sample recipient the server renders the preview for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewRequest {
    pub name: String,
    pub email: String,
}

/// # Errors
///
/// Propagates client errors.
pub async fn list(client: &ApiClient, filter: &DefaultTemplateFilter) -> Result<Paginated<DefaultTemplate>, ApiError> {
    DEFAULT_TEMPLATES.list(client, filter).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn get(client: &ApiClient, id: i64) -> Result<DefaultTemplate, ApiError> {
    DEFAULT_TEMPLATES.get(client, id).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn create(client: &ApiClient, input: &DefaultTemplateInput) -> Result<DefaultTemplate, ApiError> {
    DEFAULT_TEMPLATES.create(client, input).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn update(client: &ApiClient, id: i64, input: &DefaultTemplateInput) -> Result<DefaultTemplate, ApiError> {
    DEFAULT_TEMPLATES.update(client, id, input).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    DEFAULT_TEMPLATES.delete(client, id).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn distribute(client: &ApiClient, id: i64, request: &DistributeRequest) -> Result<SendResponse, ApiError> {
    DEFAULT_TEMPLATES
        .post_action(client, id, "distribute", Some(request))
        .await
}

/// Server-rendered preview, for tokens the client cannot substitute.
///
/// # Errors
///
/// Propagates client errors.
pub async fn preview(client: &ApiClient, id: i64, request: &PreviewRequest) -> Result<PreviewResponse, ApiError> {
    DEFAULT_TEMPLATES
        .post_action(client, id, "preview", Some(request))
        .await
}
