//! REST adapter for the parts order endpoints.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::adapters::http::{ensure_success, ApiClient, ItemsEnvelope, OpErrors};
use crate::domain::{ApiError, Order, OrderStatus};
use crate::ports::{NewOrder, OrderRepository};

const LOAD: OpErrors = OpErrors::new("Could not load orders");
const PLACE: OpErrors = OpErrors::new("Could not place the order");
const CANCEL: OpErrors = OpErrors::new("Could not cancel the order");

/// Production implementation of [`OrderRepository`].
pub struct RestOrderRepository {
    api: Arc<ApiClient>,
}

impl RestOrderRepository {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl OrderRepository for RestOrderRepository {
    async fn list(&self) -> Result<Vec<Order>, ApiError> {
        let response = ensure_success(self.api.get("/orders").await?, &LOAD)?;
        let envelope: ItemsEnvelope<OrderDto> = response.json()?;
        Ok(envelope
            .items
            .into_iter()
            .map(OrderDto::into_domain)
            .collect())
    }

    async fn get(&self, id: &str) -> Result<Order, ApiError> {
        let path = format!("/orders/{}", id);
        let response = ensure_success(self.api.get(&path).await?, &LOAD)?;
        let envelope: OrderEnvelope = response.json()?;
        Ok(envelope.order.into_domain())
    }

    async fn create(&self, request: NewOrder) -> Result<Order, ApiError> {
        let body = NewOrderDto::from(request);
        let response = ensure_success(self.api.post("/orders", &body).await?, &PLACE)?;
        let envelope: OrderEnvelope = response.json()?;
        Ok(envelope.order.into_domain())
    }

    async fn cancel(&self, id: &str) -> Result<Order, ApiError> {
        let path = format!("/orders/{}/cancel", id);
        let response = ensure_success(self.api.post_empty(&path).await?, &CANCEL)?;
        let envelope: OrderEnvelope = response.json()?;
        Ok(envelope.order.into_domain())
    }
}

// ----- Wire Types -----

#[derive(Debug, Deserialize)]
struct OrderEnvelope {
    order: OrderDto,
}

#[derive(Debug, Default, Deserialize)]
struct OrderDto {
    id: Option<String>,
    user_id: Option<String>,
    part_id: Option<String>,
    quantity: Option<u32>,
    total_cents: Option<u64>,
    status: Option<String>,
    created_at: Option<String>,
}

impl OrderDto {
    fn into_domain(self) -> Order {
        Order {
            id: self.id.unwrap_or_default(),
            user_id: self.user_id.unwrap_or_default(),
            part_id: self.part_id.unwrap_or_default(),
            quantity: self.quantity.unwrap_or_default(),
            total_cents: self.total_cents.unwrap_or_default(),
            status: self
                .status
                .as_deref()
                .map(OrderStatus::parse)
                .unwrap_or_default(),
            created_at: self.created_at.as_deref().and_then(parse_timestamp),
        }
    }
}

/// Lenient RFC 3339 parse; an unreadable timestamp maps to `None` rather
/// than failing the whole payload.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[derive(Debug, Serialize)]
struct NewOrderDto {
    part_id: String,
    quantity: u32,
    reference: String,
}

impl From<NewOrder> for NewOrderDto {
    fn from(request: NewOrder) -> Self {
        Self {
            part_id: request.part_id,
            quantity: request.quantity,
            reference: request.reference,
        }
    }
}
