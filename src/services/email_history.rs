//! Sent-email history.

use chrono::NaiveDate;

use super::Resource;
use crate::error::ApiError;
use crate::net::client::ApiClient;
use crate::net::query::{PageRequest, QueryParams, ToQuery};
use crate::net::types::{EmailHistoryEntry, Paginated};

pub const EMAIL_HISTORY: Resource = Resource::new("/api/email/history/");

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub search: Option<String>,
    pub recipient: Option<String>,
    pub status: Option<String>,
    pub sent_after: Option<NaiveDate>,
    pub sent_before: Option<NaiveDate>,
    pub page: PageRequest,
}

impl ToQuery for HistoryFilter {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("search", self.search.as_deref())
            .push_opt("recipient", self.recipient.as_deref())
            .push_opt("status", self.status.as_deref())
            .push_opt("sent_after", self.sent_after)
            .push_opt("sent_before", self.sent_before)
            .merge(self.page.to_query())
    }
}

/// # Errors
///
/// Propagates client errors.
pub async fn list(client: &ApiClient, filter: &HistoryFilter) -> Result<Paginated<EmailHistoryEntry>, ApiError> {
    EMAIL_HISTORY.list(client, filter).await
}
