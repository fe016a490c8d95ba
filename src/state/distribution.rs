//! Distribution status machine.
//!
//! DESIGN
//! ======
//! `pending -> in_progress -> {sent | failed} -> completed`, with `cancelled`
//! reachable from every non-terminal state. The client validates a requested
//! target locally and only ever adopts the status the server answers with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::net::types::Distribution;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionStatus {
    Pending,
    InProgress,
    Sent,
    Failed,
    Cancelled,
    Completed,
}

impl DistributionStatus {
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::InProgress,
        Self::Sent,
        Self::Failed,
        Self::Cancelled,
        Self::Completed,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Sent => "sent",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        use DistributionStatus::{Cancelled, Completed, Failed, InProgress, Pending, Sent};
        match (self, target) {
            (Pending, InProgress) | (InProgress, Sent | Failed) | (Sent | Failed, Completed) => true,
            (from, Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }

    /// States reachable in one step.
    #[must_use]
    pub fn next_states(self) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|target| self.can_transition_to(*target))
            .collect()
    }
}

impl fmt::Display for DistributionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown distribution status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for DistributionStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| UnknownStatus(s.to_owned()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot move distribution from {from} to {to}")]
pub struct TransitionError {
    pub from: DistributionStatus,
    pub to: DistributionStatus,
}

/// Client-side view of one distribution record.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionTracker {
    record: Distribution,
}

impl DistributionTracker {
    #[must_use]
    pub fn new(record: Distribution) -> Self {
        Self { record }
    }

    #[must_use]
    pub fn record(&self) -> &Distribution {
        &self.record
    }

    #[must_use]
    pub fn status(&self) -> DistributionStatus {
        self.record.status
    }

    /// # Errors
    ///
    /// Returns [`TransitionError`] when `target` is not reachable from the
    /// current status.
    pub fn validate(&self, target: DistributionStatus) -> Result<(), TransitionError> {
        let from = self.record.status;
        if from.can_transition_to(target) {
            Ok(())
        } else {
            Err(TransitionError { from, to: target })
        }
    }

    /// Adopt the server's copy of the record, whatever status it carries.
    pub fn apply(&mut self, record: Distribution) {
        if record.status != self.record.status {
            info!(
                distribution_id = record.id,
                from = %self.record.status,
                to = %record.status,
                "distribution status changed"
            );
        }
        self.record = record;
    }
}

#[cfg(test)]
#[path = "distribution_test.rs"]
mod tests;
