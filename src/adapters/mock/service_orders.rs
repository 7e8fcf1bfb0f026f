//! Mock service order repository.
//!
//! Emulates the backend's transition validation: `start` issues a
//! completion token, `complete` rejects a mismatched one.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use uuid::Uuid;

use super::FailureInjector;
use crate::domain::{ApiError, ServiceOrder, ServiceOrderStatus};
use crate::ports::{NewServiceOrder, ServiceOrderRepository};

/// Fake [`ServiceOrderRepository`] over in-memory state.
#[derive(Default)]
pub struct MockServiceOrderRepository {
    orders: Mutex<Vec<ServiceOrder>>,
    pub failures: FailureInjector,
}

impl MockServiceOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_orders(self, orders: Vec<ServiceOrder>) -> Self {
        *self.orders.lock().unwrap() = orders;
        self
    }

    fn transition(
        &self,
        id: &str,
        target: ServiceOrderStatus,
        apply: impl FnOnce(&mut ServiceOrder),
    ) -> Result<ServiceOrder, ApiError> {
        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| ApiError::http(404, "Not found"))?;
        if !order.status.can_transition_to(&target) {
            return Err(ApiError::http(400, "Invalid data"));
        }
        order.status = target;
        apply(order);
        Ok(order.clone())
    }
}

#[async_trait]
impl ServiceOrderRepository for MockServiceOrderRepository {
    async fn list(&self) -> Result<Vec<ServiceOrder>, ApiError> {
        self.failures.take()?;
        Ok(self.orders.lock().unwrap().clone())
    }

    async fn get(&self, id: &str) -> Result<ServiceOrder, ApiError> {
        self.failures.take()?;
        self.orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or_else(|| ApiError::http(404, "Not found"))
    }

    async fn create(&self, request: NewServiceOrder) -> Result<ServiceOrder, ApiError> {
        self.failures.take()?;
        let order = ServiceOrder {
            id: Uuid::new_v4().to_string(),
            vehicle_id: request.vehicle_id,
            description: request.description,
            status: ServiceOrderStatus::Pending,
            completion_token: None,
            scheduled_for: request.scheduled_for,
            created_at: Some(Utc::now()),
        };
        self.orders.lock().unwrap().push(order.clone());
        Ok(order)
    }

    async fn start(&self, id: &str) -> Result<ServiceOrder, ApiError> {
        self.failures.take()?;
        self.transition(id, ServiceOrderStatus::InProgress, |order| {
            order.completion_token = Some(Uuid::new_v4().to_string());
        })
    }

    async fn complete(
        &self,
        id: &str,
        completion_token: &str,
    ) -> Result<ServiceOrder, ApiError> {
        self.failures.take()?;
        {
            let orders = self.orders.lock().unwrap();
            let order = orders
                .iter()
                .find(|o| o.id == id)
                .ok_or_else(|| ApiError::http(404, "Not found"))?;
            if order.completion_token.as_deref() != Some(completion_token) {
                return Err(ApiError::http(400, "Completion token does not match"));
            }
        }
        self.transition(id, ServiceOrderStatus::Completed, |order| {
            order.completion_token = None;
        })
    }

    async fn cancel(&self, id: &str) -> Result<ServiceOrder, ApiError> {
        self.failures.take()?;
        self.transition(id, ServiceOrderStatus::Cancelled, |order| {
            order.completion_token = None;
        })
    }
}
