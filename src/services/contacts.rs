//! Contacts and referral partners.

use std::path::Path;

use tracing::{debug, warn};

use super::Resource;
use crate::error::ApiError;
use crate::net::client::{ApiClient, ApiRequest, MultipartBody};
use crate::net::query::{PageRequest, QueryParams, ToQuery};
use crate::net::types::{Contact, ContactField, CustomerType, NewContact, Paginated, SendStatus};

pub const CONTACTS: Resource = Resource::new("/api/contacts/");

/// Upper bound on pages walked by [`fetch_all`].
const MAX_PAGES: u32 = 500;
const FETCH_ALL_PAGE_SIZE: u32 = 200;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    pub search: Option<String>,
    pub customer_type: Option<CustomerType>,
    pub send_status: Option<SendStatus>,
    pub optout: Option<bool>,
    pub newsletter_version: Option<String>,
    pub ordering: Option<String>,
    pub page: PageRequest,
}

impl ToQuery for ContactFilter {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("search", self.search.as_deref())
            .push_opt("customer_type", self.customer_type.map(CustomerType::as_str))
            .push_opt("send_status", self.send_status.map(SendStatus::as_str))
            .push_opt("optout", self.optout)
            .push_opt("newsletter_version", self.newsletter_version.as_deref())
            .push_opt("ordering", self.ordering.as_deref())
            .merge(self.page.to_query())
    }
}

/// # Errors
///
/// Propagates client errors.
pub async fn list(client: &ApiClient, filter: &ContactFilter) -> Result<Paginated<Contact>, ApiError> {
    CONTACTS.list(client, filter).await
}

/// Walk every page matching `filter`. Used where the full set is needed,
/// such as recipient resolution.
///
/// # Errors
///
/// Propagates client errors from any page.
pub async fn fetch_all(client: &ApiClient, filter: &ContactFilter) -> Result<Vec<Contact>, ApiError> {
    fetch_pages(client, filter, MAX_PAGES).await
}

async fn fetch_pages(client: &ApiClient, filter: &ContactFilter, max_pages: u32) -> Result<Vec<Contact>, ApiError> {
    let mut all = Vec::new();
    let mut filter = filter.clone();
    filter.page.page_size = Some(filter.page.page_size.unwrap_or(FETCH_ALL_PAGE_SIZE));

    for page in 1..=max_pages {
        filter.page.page = Some(page);
        let chunk = list(client, &filter).await?;
        let done = chunk.next.is_none() || chunk.results.is_empty();
        all.extend(chunk.results);
        debug!(page, fetched = all.len(), total = chunk.count, "contacts page fetched");
        if done {
            return Ok(all);
        }
        if page == max_pages {
            warn!(max_pages, fetched = all.len(), total = chunk.count, "contact listing truncated at page limit");
        }
    }
    Ok(all)
}

/// # Errors
///
/// Propagates client errors.
pub async fn get(client: &ApiClient, id: i64) -> Result<Contact, ApiError> {
    CONTACTS.get(client, id).await
}

/// Create a contact from the multipart form, with an optional photo.
///
/// # Errors
///
/// Returns [`ApiError::Upload`] if the photo cannot be read, else client errors.
pub async fn create(client: &ApiClient, contact: &NewContact, photo: Option<&Path>) -> Result<Contact, ApiError> {
    let mut form = contact_form(contact);
    if let Some(path) = photo {
        form = form.file_from_path("photo", path).await?;
    }
    client
        .send_json(&ApiRequest::post(CONTACTS.collection()).multipart(form))
        .await
}

/// Inline edit: `PATCH` exactly one field.
///
/// # Errors
///
/// Propagates client errors.
pub async fn update_field(client: &ApiClient, id: i64, field: &ContactField) -> Result<Contact, ApiError> {
    CONTACTS.update(client, id, &field.to_patch()).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    CONTACTS.delete(client, id).await
}

fn contact_form(contact: &NewContact) -> MultipartBody {
    MultipartBody::new()
        .text("first_name", contact.first_name.clone())
        .text("last_name", contact.last_name.clone())
        .text("email", contact.email.clone())
        .text_opt("phone", contact.phone.clone())
        .text_opt("company", contact.company.clone())
        .text_opt("customer_type", contact.customer_type.map(CustomerType::as_str))
        .text_opt("send_status", contact.send_status.map(SendStatus::as_str))
        .text_opt("newsletter_version", contact.newsletter_version.clone())
        .text_opt("notes", contact.notes.clone())
}

#[cfg(test)]
#[path = "contacts_test.rs"]
mod tests;
