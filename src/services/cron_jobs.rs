//! Scheduled server jobs and their lifecycle controls.

use super::Resource;
use crate::error::ApiError;
use crate::net::client::ApiClient;
use crate::net::query::ListQuery;
use crate::net::types::{CronJob, CronJobInput, Paginated};

pub const CRON_JOBS: Resource = Resource::new("/api/cron-jobs/");

/// Lifecycle action on a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CronAction {
    Start,
    Stop,
    Restart,
}

impl CronAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
        }
    }
}

/// # Errors
///
/// Propagates client errors.
pub async fn list(client: &ApiClient, query: &ListQuery) -> Result<Paginated<CronJob>, ApiError> {
    CRON_JOBS.list(client, query).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn get(client: &ApiClient, id: i64) -> Result<CronJob, ApiError> {
    CRON_JOBS.get(client, id).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn create(client: &ApiClient, input: &CronJobInput) -> Result<CronJob, ApiError> {
    CRON_JOBS.create(client, input).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn update(client: &ApiClient, id: i64, input: &CronJobInput) -> Result<CronJob, ApiError> {
    CRON_JOBS.update(client, id, input).await
}

/// # Errors
///
/// Propagates client errors.
pub async fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    CRON_JOBS.delete(client, id).await
}

/// Run a lifecycle action; the server answers with the job's new state.
///
/// # Errors
///
/// Propagates client errors.
pub async fn control(client: &ApiClient, id: i64, action: CronAction) -> Result<CronJob, ApiError> {
    CRON_JOBS.post_action(client, id, action.as_str(), None::<&()>).await
}
