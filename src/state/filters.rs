//! Filter and search state for list screens.
//!
//! DESIGN
//! ======
//! Edits land in the live state immediately and reach the applied
//! [`QueryKey`] only after the debounce window passes without another edit.
//! The `_at` methods take the current instant so the timing is testable
//! without a runtime; the plain methods read the tokio clock.
//!
//! Record matching ([`matches_search`], [`matches_filters`]) is the single
//! client-side search rule for every list.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::time::Duration;

use tokio::time::Instant;

use super::debounce::Debouncer;
use crate::config::ClientConfig;
use crate::net::query::{PageRequest, QueryParams, ToQuery};
use crate::net::types::{Contact, DefaultTemplate, EmailHistoryEntry, EmailTemplate};

// =============================================================================
// RECORD MATCHING
// =============================================================================

/// Named text access to a record's fields.
pub trait Searchable {
    /// `None` when the record has no such field or it is unset.
    fn field(&self, name: &str) -> Option<Cow<'_, str>>;
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// True when any of `fields` contains `search`, ignoring case. A blank
/// search matches everything.
#[must_use]
pub fn matches_search<R: Searchable + ?Sized>(record: &R, fields: &[&str], search: &str) -> bool {
    let search = search.trim();
    search.is_empty()
        || fields
            .iter()
            .any(|name| record.field(name).is_some_and(|value| contains_ci(&value, search)))
}

/// True when every filter's value occurs in its field, ignoring case.
#[must_use]
pub fn matches_filters<R: Searchable + ?Sized>(record: &R, filters: &BTreeMap<String, String>) -> bool {
    filters
        .iter()
        .all(|(name, wanted)| record.field(name).is_some_and(|value| contains_ci(&value, wanted)))
}

// =============================================================================
// QUERY KEY
// =============================================================================

/// Identity of one list query: resource, column filters and search text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub resource: &'static str,
    pub filters: BTreeMap<String, String>,
    pub search: String,
    pub page: Option<u32>,
}

impl QueryKey {
    #[must_use]
    pub fn new(resource: &'static str) -> Self {
        Self { resource, filters: BTreeMap::new(), search: String::new(), page: None }
    }

    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}

impl ToQuery for QueryKey {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push("search", &self.search)
            .extend_map(&self.filters)
            .merge(PageRequest { page: self.page, page_size: None }.to_query())
    }
}

// =============================================================================
// FILTER STATE
// =============================================================================

type Snapshot = (BTreeMap<String, String>, String);

#[derive(Debug, Clone)]
pub struct FilterState {
    resource: &'static str,
    filters: BTreeMap<String, String>,
    search: String,
    debounce: Debouncer<Snapshot>,
    applied: QueryKey,
}

impl FilterState {
    #[must_use]
    pub fn new(resource: &'static str, window: Duration) -> Self {
        Self {
            resource,
            filters: BTreeMap::new(),
            search: String::new(),
            debounce: Debouncer::new(window),
            applied: QueryKey::new(resource),
        }
    }

    /// Filter state debounced by the configured window.
    #[must_use]
    pub fn from_config(resource: &'static str, config: &ClientConfig) -> Self {
        Self::new(resource, config.debounce)
    }

    /// Live filters, including edits still inside the debounce window.
    #[must_use]
    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// The key list requests should use right now.
    #[must_use]
    pub fn query_key(&self) -> &QueryKey {
        &self.applied
    }

    #[must_use]
    pub fn is_settling(&self) -> bool {
        self.debounce.is_pending()
    }

    /// Set a column filter; a blank value clears it.
    pub fn set_filter_at(&mut self, field: &str, value: &str, now: Instant) {
        let value = value.trim();
        if value.is_empty() {
            self.filters.remove(field);
        } else {
            self.filters.insert(field.to_owned(), value.to_owned());
        }
        self.schedule(now);
    }

    /// Remove the filter key entirely.
    pub fn clear_filter_at(&mut self, field: &str, now: Instant) {
        self.filters.remove(field);
        self.schedule(now);
    }

    pub fn clear_all_at(&mut self, now: Instant) {
        self.filters.clear();
        self.search.clear();
        self.schedule(now);
    }

    pub fn set_search_at(&mut self, search: &str, now: Instant) {
        search.trim().clone_into(&mut self.search);
        self.schedule(now);
    }

    /// Apply pending edits once they have been quiet for the window.
    /// Returns the new key when it changed.
    pub fn poll_at(&mut self, now: Instant) -> Option<&QueryKey> {
        let (filters, search) = self.debounce.poll_at(now)?;
        self.apply(filters, search)
    }

    /// Apply pending edits without waiting.
    pub fn flush(&mut self) -> Option<&QueryKey> {
        let (filters, search) = self.debounce.take()?;
        self.apply(filters, search)
    }

    pub fn set_filter(&mut self, field: &str, value: &str) {
        self.set_filter_at(field, value, Instant::now());
    }

    pub fn clear_filter(&mut self, field: &str) {
        self.clear_filter_at(field, Instant::now());
    }

    pub fn set_search(&mut self, search: &str) {
        self.set_search_at(search, Instant::now());
    }

    pub fn poll(&mut self) -> Option<&QueryKey> {
        self.poll_at(Instant::now())
    }

    /// Client-side match against the live state.
    #[must_use]
    pub fn matches<R: Searchable + ?Sized>(&self, record: &R, search_fields: &[&str]) -> bool {
        matches_search(record, search_fields, &self.search) && matches_filters(record, &self.filters)
    }

    fn schedule(&mut self, now: Instant) {
        self.debounce
            .push_at((self.filters.clone(), self.search.clone()), now);
    }

    fn apply(&mut self, filters: BTreeMap<String, String>, search: String) -> Option<&QueryKey> {
        let next = QueryKey { resource: self.resource, filters, search, page: None };
        if next == self.applied {
            return None;
        }
        self.applied = next;
        Some(&self.applied)
    }
}

// =============================================================================
// SEARCHABLE RECORDS
// =============================================================================

pub const CONTACT_SEARCH_FIELDS: &[&str] = &["first_name", "last_name", "email", "company", "phone"];
pub const TEMPLATE_SEARCH_FIELDS: &[&str] = &["name", "subject"];
pub const HISTORY_SEARCH_FIELDS: &[&str] = &["template_name", "subject", "recipient"];

fn opt(value: Option<&String>) -> Option<Cow<'_, str>> {
    value.map(|v| Cow::Borrowed(v.as_str()))
}

impl Searchable for Contact {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "first_name" => Some(Cow::Borrowed(&self.first_name)),
            "last_name" => Some(Cow::Borrowed(&self.last_name)),
            "name" => Some(Cow::Owned(self.display_name())),
            "email" => Some(Cow::Borrowed(&self.email)),
            "phone" => opt(self.phone.as_ref()),
            "company" => opt(self.company.as_ref()),
            "customer_type" => Some(Cow::Borrowed(self.customer_type.as_str())),
            "send_status" => Some(Cow::Borrowed(self.send_status.as_str())),
            "newsletter_version" => opt(self.newsletter_version.as_ref()),
            "loan_type" => opt(self.loan_type.as_ref()),
            "notes" => opt(self.notes.as_ref()),
            _ => None,
        }
    }
}

impl Searchable for EmailTemplate {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "name" => Some(Cow::Borrowed(&self.name)),
            "subject" => Some(Cow::Borrowed(&self.subject)),
            _ => None,
        }
    }
}

impl Searchable for DefaultTemplate {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "name" => Some(Cow::Borrowed(&self.name)),
            "subject" => Some(Cow::Borrowed(&self.subject)),
            "category" => self.category.map(|c| Cow::Owned(c.to_string())),
            "email_type" => self.email_type.map(|t| Cow::Owned(t.to_string())),
            _ => None,
        }
    }
}

impl Searchable for EmailHistoryEntry {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "template_name" => Some(Cow::Borrowed(&self.template_name)),
            "subject" => Some(Cow::Borrowed(&self.subject)),
            "recipient" => Some(Cow::Borrowed(&self.recipient)),
            "status" => Some(Cow::Borrowed(&self.status)),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "filters_test.rs"]
mod tests;
