//! REST adapter for the service order endpoints.
//!
//! Lifecycle transitions go through dedicated sub-paths (`start`,
//! `complete`, `cancel`); the backend owns transition validation and the
//! completion-token check.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::adapters::http::{ensure_success, ApiClient, ItemsEnvelope, OpErrors};
use crate::domain::{ApiError, ServiceOrder, ServiceOrderStatus};
use crate::ports::{NewServiceOrder, ServiceOrderRepository};

const LOAD: OpErrors = OpErrors::new("Could not load service orders");
const CREATE: OpErrors = OpErrors::new("Could not create the service order");
const START: OpErrors = OpErrors::new("Could not start the service order");
const COMPLETE: OpErrors = OpErrors::new("Could not complete the service order");
const CANCEL: OpErrors = OpErrors::new("Could not cancel the service order");

/// Production implementation of [`ServiceOrderRepository`].
pub struct RestServiceOrderRepository {
    api: Arc<ApiClient>,
}

impl RestServiceOrderRepository {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    async fn transition(
        &self,
        id: &str,
        action: &str,
        op: &OpErrors,
    ) -> Result<ServiceOrder, ApiError> {
        let path = format!("/service-orders/{}/{}", id, action);
        let response = ensure_success(self.api.post_empty(&path).await?, op)?;
        let envelope: ServiceOrderEnvelope = response.json()?;
        Ok(envelope.service_order.into_domain())
    }
}

#[async_trait]
impl ServiceOrderRepository for RestServiceOrderRepository {
    async fn list(&self) -> Result<Vec<ServiceOrder>, ApiError> {
        let response = ensure_success(self.api.get("/service-orders").await?, &LOAD)?;
        let envelope: ItemsEnvelope<ServiceOrderDto> = response.json()?;
        Ok(envelope
            .items
            .into_iter()
            .map(ServiceOrderDto::into_domain)
            .collect())
    }

    async fn get(&self, id: &str) -> Result<ServiceOrder, ApiError> {
        let path = format!("/service-orders/{}", id);
        let response = ensure_success(self.api.get(&path).await?, &LOAD)?;
        let envelope: ServiceOrderEnvelope = response.json()?;
        Ok(envelope.service_order.into_domain())
    }

    async fn create(&self, request: NewServiceOrder) -> Result<ServiceOrder, ApiError> {
        let body = NewServiceOrderDto::from(request);
        let response = ensure_success(self.api.post("/service-orders", &body).await?, &CREATE)?;
        let envelope: ServiceOrderEnvelope = response.json()?;
        Ok(envelope.service_order.into_domain())
    }

    async fn start(&self, id: &str) -> Result<ServiceOrder, ApiError> {
        self.transition(id, "start", &START).await
    }

    async fn complete(
        &self,
        id: &str,
        completion_token: &str,
    ) -> Result<ServiceOrder, ApiError> {
        let path = format!("/service-orders/{}/complete", id);
        let body = CompleteRequestDto {
            completion_token: completion_token.to_string(),
        };
        let response = ensure_success(self.api.post(&path, &body).await?, &COMPLETE)?;
        let envelope: ServiceOrderEnvelope = response.json()?;
        Ok(envelope.service_order.into_domain())
    }

    async fn cancel(&self, id: &str) -> Result<ServiceOrder, ApiError> {
        self.transition(id, "cancel", &CANCEL).await
    }
}

// ----- Wire Types -----

#[derive(Debug, Deserialize)]
struct ServiceOrderEnvelope {
    service_order: ServiceOrderDto,
}

#[derive(Debug, Default, Deserialize)]
struct ServiceOrderDto {
    id: Option<String>,
    vehicle_id: Option<String>,
    description: Option<String>,
    status: Option<String>,
    completion_token: Option<String>,
    scheduled_for: Option<String>,
    created_at: Option<String>,
}

impl ServiceOrderDto {
    fn into_domain(self) -> ServiceOrder {
        ServiceOrder {
            id: self.id.unwrap_or_default(),
            vehicle_id: self.vehicle_id.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            status: self
                .status
                .as_deref()
                .map(ServiceOrderStatus::parse)
                .unwrap_or_default(),
            // Absent means "not issued"; no placeholder.
            completion_token: self.completion_token,
            scheduled_for: self.scheduled_for.as_deref().and_then(parse_timestamp),
            created_at: self.created_at.as_deref().and_then(parse_timestamp),
        }
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[derive(Debug, Serialize)]
struct NewServiceOrderDto {
    vehicle_id: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    scheduled_for: Option<String>,
}

impl From<NewServiceOrder> for NewServiceOrderDto {
    fn from(request: NewServiceOrder) -> Self {
        Self {
            vehicle_id: request.vehicle_id,
            description: request.description,
            scheduled_for: request.scheduled_for.map(|dt| dt.to_rfc3339()),
        }
    }
}

#[derive(Debug, Serialize)]
struct CompleteRequestDto {
    completion_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_order_dto_maps_full_payload() {
        let dto: ServiceOrderDto = serde_json::from_str(
            r#"{
                "id": "s1", "vehicle_id": "v1", "description": "Brake service",
                "status": "in_progress", "completion_token": "ct-9",
                "scheduled_for": "2026-09-01T09:00:00Z"
            }"#,
        )
        .unwrap();
        let order = dto.into_domain();
        assert_eq!(order.id, "s1");
        assert_eq!(order.status, ServiceOrderStatus::InProgress);
        assert_eq!(order.completion_token.as_deref(), Some("ct-9"));
        assert!(order.scheduled_for.is_some());
    }

    #[test]
    fn service_order_dto_keeps_token_absent_when_not_issued() {
        let dto: ServiceOrderDto = serde_json::from_str(r#"{"id": "s1"}"#).unwrap();
        let order = dto.into_domain();
        assert_eq!(order.status, ServiceOrderStatus::Pending);
        assert!(order.completion_token.is_none());
    }

    #[test]
    fn complete_request_serializes_the_token() {
        let body = CompleteRequestDto {
            completion_token: "ct-9".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "completion_token": "ct-9" }));
    }

    #[test]
    fn new_service_order_omits_absent_schedule() {
        let request = NewServiceOrder {
            vehicle_id: "v1".to_string(),
            description: "Brake service".to_string(),
            scheduled_for: None,
        };
        let json = serde_json::to_value(NewServiceOrderDto::from(request)).unwrap();
        assert!(json.get("scheduled_for").is_none());
    }
}
