//! Service order entity and its lifecycle status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A workshop service order for a registered vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOrder {
    pub id: String,
    pub vehicle_id: String,
    pub description: String,
    pub status: ServiceOrderStatus,
    /// Server-issued token required to authorize completion. Present only
    /// while the order is in progress.
    pub completion_token: Option<String>,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Lifecycle status of a service order.
///
/// Transitions are driven by dedicated backend sub-paths; the client checks
/// them locally only to keep invalid intents from reaching the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ServiceOrderStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl ServiceOrderStatus {
    /// Parses a wire status string, defaulting to `Pending` for unknown values.
    pub fn parse(value: &str) -> Self {
        match value {
            "in_progress" => ServiceOrderStatus::InProgress,
            "completed" => ServiceOrderStatus::Completed,
            "cancelled" => ServiceOrderStatus::Cancelled,
            _ => ServiceOrderStatus::Pending,
        }
    }

    /// Wire representation used in query parameters.
    pub fn as_wire(&self) -> &'static str {
        match self {
            ServiceOrderStatus::Pending => "pending",
            ServiceOrderStatus::InProgress => "in_progress",
            ServiceOrderStatus::Completed => "completed",
            ServiceOrderStatus::Cancelled => "cancelled",
        }
    }

    /// Validates a transition from this status to another.
    ///
    /// Valid transitions:
    /// - Pending -> InProgress (start)
    /// - InProgress -> Completed (complete, with matching token)
    /// - Pending | InProgress -> Cancelled (cancel)
    pub fn can_transition_to(&self, target: &ServiceOrderStatus) -> bool {
        use ServiceOrderStatus::*;
        matches!(
            (self, target),
            (Pending, InProgress) | (InProgress, Completed) | (Pending, Cancelled) | (InProgress, Cancelled)
        )
    }
}

impl fmt::Display for ServiceOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ServiceOrderStatus::Pending => "Pending",
            ServiceOrderStatus::InProgress => "In progress",
            ServiceOrderStatus::Completed => "Completed",
            ServiceOrderStatus::Cancelled => "Cancelled",
        };
        write!(f, "{}", s)
    }
}
