//! Mock parts order repository.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use uuid::Uuid;

use super::FailureInjector;
use crate::domain::{ApiError, Order, OrderStatus};
use crate::ports::{NewOrder, OrderRepository};

/// Fake [`OrderRepository`] over in-memory state.
#[derive(Default)]
pub struct MockOrderRepository {
    orders: Mutex<Vec<Order>>,
    pub failures: FailureInjector,
    create_calls: Mutex<usize>,
}

impl MockOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_orders(self, orders: Vec<Order>) -> Self {
        *self.orders.lock().unwrap() = orders;
        self
    }

    /// Number of `create` calls so far; lets tests assert that a rejected
    /// intent never reached the repository.
    pub fn create_call_count(&self) -> usize {
        *self.create_calls.lock().unwrap()
    }
}

#[async_trait]
impl OrderRepository for MockOrderRepository {
    async fn list(&self) -> Result<Vec<Order>, ApiError> {
        self.failures.take()?;
        Ok(self.orders.lock().unwrap().clone())
    }

    async fn get(&self, id: &str) -> Result<Order, ApiError> {
        self.failures.take()?;
        self.orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or_else(|| ApiError::http(404, "Not found"))
    }

    async fn create(&self, request: NewOrder) -> Result<Order, ApiError> {
        *self.create_calls.lock().unwrap() += 1;
        self.failures.take()?;
        let order = Order {
            id: Uuid::new_v4().to_string(),
            user_id: "u1".to_string(),
            part_id: request.part_id,
            quantity: request.quantity,
            total_cents: 0,
            status: OrderStatus::Pending,
            created_at: Some(Utc::now()),
        };
        self.orders.lock().unwrap().push(order.clone());
        Ok(order)
    }

    async fn cancel(&self, id: &str) -> Result<Order, ApiError> {
        self.failures.take()?;
        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| ApiError::http(404, "Not found"))?;
        if !order.status.is_cancellable() {
            return Err(ApiError::http(400, "Order can no longer be cancelled"));
        }
        order.status = OrderStatus::Cancelled;
        Ok(order.clone())
    }
}
