//! Parts order entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A placed parts order. References the purchased part by id only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub part_id: String,
    pub quantity: u32,
    /// Total charged in cents.
    pub total_cents: u64,
    pub status: OrderStatus,
    pub created_at: Option<DateTime<Utc>>,
}

/// Backend-owned order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Parses a wire status string, defaulting to `Pending` for unknown values.
    pub fn parse(value: &str) -> Self {
        match value {
            "shipped" => OrderStatus::Shipped,
            "delivered" => OrderStatus::Delivered,
            "cancelled" => OrderStatus::Cancelled,
            _ => OrderStatus::Pending,
        }
    }

    /// Whether the user may still cancel this order.
    pub fn is_cancellable(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }
}
