//! Parts order repository port.

use async_trait::async_trait;

use crate::domain::{ApiError, Order};

/// Port for the order endpoints.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Order>, ApiError>;

    async fn get(&self, id: &str) -> Result<Order, ApiError>;

    async fn create(&self, request: NewOrder) -> Result<Order, ApiError>;

    async fn cancel(&self, id: &str) -> Result<Order, ApiError>;
}

/// Payload for placing an order.
///
/// `reference` is a client-generated idempotency key so a retried submit
/// cannot double-charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub part_id: String,
    pub quantity: u32,
    pub reference: String,
}

impl NewOrder {
    /// Creates an order payload with a fresh idempotency reference.
    pub fn new(part_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            part_id: part_id.into(),
            quantity,
            reference: uuid::Uuid::new_v4().to_string(),
        }
    }
}
