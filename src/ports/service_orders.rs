//! Service order repository port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{ApiError, ServiceOrder};

/// Port for the service order endpoints and their lifecycle sub-paths.
#[async_trait]
pub trait ServiceOrderRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<ServiceOrder>, ApiError>;

    async fn get(&self, id: &str) -> Result<ServiceOrder, ApiError>;

    async fn create(&self, request: NewServiceOrder) -> Result<ServiceOrder, ApiError>;

    /// Transition a pending order to in-progress.
    async fn start(&self, id: &str) -> Result<ServiceOrder, ApiError>;

    /// Transition an in-progress order to completed. The backend rejects
    /// the call unless `completion_token` matches the server-issued one.
    async fn complete(&self, id: &str, completion_token: &str)
        -> Result<ServiceOrder, ApiError>;

    /// Cancel a pending or in-progress order.
    async fn cancel(&self, id: &str) -> Result<ServiceOrder, ApiError>;
}

/// Payload for booking a service order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewServiceOrder {
    pub vehicle_id: String,
    pub description: String,
    pub scheduled_for: Option<DateTime<Utc>>,
}
