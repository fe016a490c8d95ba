//! Staff email templates: CRUD, clone-from-default, send, HTML upload and
//! attachments.

use std::path::Path;

use super::Resource;
use crate::error::ApiError;
use crate::net::client::{ApiClient, ApiRequest, MultipartBody};
use crate::net::query::ListQuery;
use crate::net::types::{
    Attachment, DefaultTemplate, EmailTemplate, EmailTemplateInput, Paginated, SendRequest, SendResponse,
};

pub const CUSTOMER_TEMPLATES: Resource = Resource::new("/api/email/templates/");

/// # Errors
///
/// Propagates client errors.
pub async fn list(client: &ApiClient, query: &ListQuery) -> Result<Paginated<EmailTemplate>, ApiError> {
    CUSTOMER_TEMPLATES.list(client, query).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn get(client: &ApiClient, id: i64) -> Result<EmailTemplate, ApiError> {
    CUSTOMER_TEMPLATES.get(client, id).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn create(client: &ApiClient, input: &EmailTemplateInput) -> Result<EmailTemplate, ApiError> {
    CUSTOMER_TEMPLATES.create(client, input).await
}

/// Body for a new template copied from `source`, keeping its ancestry.
#[must_use]
pub fn clone_input(source: &DefaultTemplate, name: Option<&str>) -> EmailTemplateInput {
    EmailTemplateInput {
        name: Some(name.map_or_else(|| source.name.clone(), str::to_owned)),
        subject: Some(source.subject.clone()),
        html: Some(source.html.clone()),
        design: None,
        default_template: Some(source.id),
        is_active: Some(true),
    }
}

/// # Errors
///
/// Propagates client errors.
pub async fn clone_from_default(
    client: &ApiClient,
    source: &DefaultTemplate,
    name: Option<&str>,
) -> Result<EmailTemplate, ApiError> {
    create(client, &clone_input(source, name)).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn update(client: &ApiClient, id: i64, input: &EmailTemplateInput) -> Result<EmailTemplate, ApiError> {
    CUSTOMER_TEMPLATES.update(client, id, input).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    CUSTOMER_TEMPLATES.delete(client, id).await
}

/// Fan the template out to an already-resolved recipient set.
///
/// # Errors
///
/// Propagates client errors.
pub async fn send(client: &ApiClient, id: i64, request: &SendRequest) -> Result<SendResponse, ApiError> {
    CUSTOMER_TEMPLATES
        .post_action(client, id, "send", Some(request))
        .await
}

/// Replace the template body with an uploaded HTML file.
///
/// # Errors
///
/// Returns [`ApiError::Upload`] if the file cannot be read, else client errors.
pub async fn upload_html(client: &ApiClient, id: i64, path: &Path) -> Result<EmailTemplate, ApiError> {
    let form = MultipartBody::new().file_from_path("html_file", path).await?;
    client
        .send_json(&ApiRequest::post(CUSTOMER_TEMPLATES.action(id, "upload-html")).multipart(form))
        .await
}

/// # Errors
///
/// Returns [`ApiError::Upload`] if the file cannot be read, else client errors.
pub async fn add_attachment(client: &ApiClient, id: i64, path: &Path) -> Result<Attachment, ApiError> {
    let form = MultipartBody::new().file_from_path("file", path).await?;
    client
        .send_json(&ApiRequest::post(CUSTOMER_TEMPLATES.action(id, "attachments")).multipart(form))
        .await
}

/// # Errors
///
/// Propagates client errors.
pub async fn remove_attachment(client: &ApiClient, id: i64, attachment_id: i64) -> Result<(), ApiError> {
    let path = format!("{}{attachment_id}/", CUSTOMER_TEMPLATES.action(id, "attachments"));
    client.send_empty(&ApiRequest::delete(path)).await
}

#[cfg(test)]
#[path = "customer_templates_test.rs"]
mod tests;
