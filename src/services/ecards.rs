//! Ecards: CRUD with image upload, distribution to all users, and ad hoc
//! personalized sends.
//!
//! DESIGN
//! ======
//! Ad hoc sends render every recipient's copy client-side with the same
//! placeholder substitution the preview uses, so what staff previewed is
//! byte-for-byte what each recipient gets.

use std::path::Path;

use serde::Serialize;

use super::Resource;
use crate::error::ApiError;
use crate::net::client::{ApiClient, ApiRequest, MultipartBody};
use crate::net::query::{PageRequest, QueryParams, ToQuery};
use crate::net::types::{Ecard, EcardInput, Paginated, SendResponse};
use crate::util::placeholder::{PlaceholderSet, Recipient};

pub const ECARDS: Resource = Resource::new("/api/ecards/");

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EcardFilter {
    pub search: Option<String>,
    pub category: Option<u16>,
    pub is_active: Option<bool>,
    pub page: PageRequest,
}

impl ToQuery for EcardFilter {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("search", self.search.as_deref())
            .push_opt("category", self.category)
            .push_opt("is_active", self.is_active)
            .merge(self.page.to_query())
    }
}

/// One rendered copy of an ecard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonalizedMessage {
    pub email: String,
    pub name: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct PersonalizedSend<'a> {
    messages: &'a [PersonalizedMessage],
}

/// # Errors
///
/// Propagates client errors.
pub async fn list(client: &ApiClient, filter: &EcardFilter) -> Result<Paginated<Ecard>, ApiError> {
    ECARDS.list(client, filter).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn get(client: &ApiClient, id: i64) -> Result<Ecard, ApiError> {
    ECARDS.get(client, id).await
}

/// # Errors
///
/// Returns [`ApiError::Upload`] if the image cannot be read, else client errors.
pub async fn create(client: &ApiClient, input: &EcardInput, image: Option<&Path>) -> Result<Ecard, ApiError> {
    let form = ecard_form(input, image).await?;
    client
        .send_json(&ApiRequest::post(ECARDS.collection()).multipart(form))
        .await
}

/// # Errors
///
/// Returns [`ApiError::Upload`] if the image cannot be read, else client errors.
pub async fn update(client: &ApiClient, id: i64, input: &EcardInput, image: Option<&Path>) -> Result<Ecard, ApiError> {
    let form = ecard_form(input, image).await?;
    client
        .send_json(&ApiRequest::patch(ECARDS.item(id)).multipart(form))
        .await
}

/// # Errors
///
/// Propagates client errors.
pub async fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    ECARDS.delete(client, id).await
}

/// Queue the ecard for every user; the server records a distribution.
///
/// # Errors
///
/// Propagates client errors.
pub async fn distribute(client: &ApiClient, id: i64) -> Result<SendResponse, ApiError> {
    ECARDS
        .post_action(client, id, "distribute", None::<&()>)
        .await
}

/// Render one copy of `ecard` per recipient.
#[must_use]
pub fn personalize(ecard: &Ecard, recipients: &[Recipient], placeholders: &PlaceholderSet) -> Vec<PersonalizedMessage> {
    recipients
        .iter()
        .map(|r| PersonalizedMessage {
            email: r.email.clone(),
            name: r.name.clone(),
            html: placeholders.substitute(&ecard.html, r),
        })
        .collect()
}

/// # Errors
///
/// Propagates client errors.
pub async fn send_personalized(
    client: &ApiClient,
    ecard: &Ecard,
    recipients: &[Recipient],
    placeholders: &PlaceholderSet,
) -> Result<SendResponse, ApiError> {
    let messages = personalize(ecard, recipients, placeholders);
    ECARDS
        .post_action(client, ecard.id, "send", Some(&PersonalizedSend { messages: &messages }))
        .await
}

async fn ecard_form(input: &EcardInput, image: Option<&Path>) -> Result<MultipartBody, ApiError> {
    let form = MultipartBody::new()
        .text_opt("name", input.name.clone())
        .text_opt("category", input.category.map(|c| c.to_string()))
        .text_opt("greeting", input.greeting.clone())
        .text_opt("html", input.html.clone())
        .text_opt("date", input.date.map(|d| d.to_string()))
        .text_opt("is_active", input.is_active.map(|b| b.to_string()));
    match image {
        Some(path) => form.file_from_path("image", path).await,
        None => Ok(form),
    }
}

#[cfg(test)]
#[path = "ecards_test.rs"]
mod tests;
