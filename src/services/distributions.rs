//! Ecard and newsletter distribution records.

use serde::Serialize;
use tracing::warn;

use super::Resource;
use crate::error::ApiError;
use crate::net::client::ApiClient;
use crate::net::query::{PageRequest, QueryParams, ToQuery};
use crate::net::types::{Distribution, DistributionKind, NewDistribution, Paginated};
use crate::state::distribution::{DistributionStatus, DistributionTracker, TransitionError};

pub const ECARD_DISTRIBUTIONS: Resource = Resource::new("/api/distributions/ecards/");
pub const NEWSLETTER_DISTRIBUTIONS: Resource = Resource::new("/api/distributions/newsletters/");

#[must_use]
pub fn resource(kind: DistributionKind) -> Resource {
    match kind {
        DistributionKind::Ecard => ECARD_DISTRIBUTIONS,
        DistributionKind::Newsletter => NEWSLETTER_DISTRIBUTIONS,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StatusChangeError {
    #[error(transparent)]
    Rejected(#[from] TransitionError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistributionFilter {
    pub status: Option<DistributionStatus>,
    pub page: PageRequest,
}

impl ToQuery for DistributionFilter {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("status", self.status.map(DistributionStatus::as_str))
            .merge(self.page.to_query())
    }
}

#[derive(Serialize)]
struct StatusPatch {
    status: DistributionStatus,
}

/// # Errors
///
/// Propagates client errors.
pub async fn list(
    client: &ApiClient,
    kind: DistributionKind,
    filter: &DistributionFilter,
) -> Result<Paginated<Distribution>, ApiError> {
    resource(kind).list(client, filter).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn get(client: &ApiClient, kind: DistributionKind, id: i64) -> Result<Distribution, ApiError> {
    resource(kind).get(client, id).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn create(client: &ApiClient, kind: DistributionKind, input: &NewDistribution) -> Result<Distribution, ApiError> {
    resource(kind).create(client, input).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn delete(client: &ApiClient, kind: DistributionKind, id: i64) -> Result<(), ApiError> {
    resource(kind).delete(client, id).await
}

/// Ask the server to move a distribution to `target`.
///
/// Invalid transitions are rejected before any request is made. On success
/// the tracker holds the server's record, which may carry a different status
/// than the one requested.
///
/// # Errors
///
/// Returns [`StatusChangeError::Rejected`] for a transition the status
/// machine forbids, else client errors.
pub async fn request_status(
    client: &ApiClient,
    kind: DistributionKind,
    tracker: &mut DistributionTracker,
    target: DistributionStatus,
) -> Result<DistributionStatus, StatusChangeError> {
    tracker.validate(target)?;
    let id = tracker.record().id;
    let updated: Distribution = resource(kind)
        .update(client, id, &StatusPatch { status: target })
        .await?;
    if updated.status != target {
        warn!(distribution_id = id, requested = %target, actual = %updated.status, "server kept a different status");
    }
    tracker.apply(updated);
    Ok(tracker.status())
}

#[cfg(test)]
#[path = "distributions_test.rs"]
mod tests;
