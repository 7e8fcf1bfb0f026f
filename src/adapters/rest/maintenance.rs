//! REST adapter for maintenance history and recommendation endpoints.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::adapters::http::{ensure_success, ApiClient, ItemsEnvelope, OpErrors};
use crate::domain::{ApiError, MaintenanceRecommendation, MaintenanceRecord};
use crate::ports::{MaintenanceRecordUpdate, MaintenanceRepository, NewMaintenanceRecord};

const LOAD: OpErrors = OpErrors::new("Could not load maintenance records");
const SAVE: OpErrors = OpErrors::new("Could not save the maintenance record");
const DELETE: OpErrors = OpErrors::new("Could not delete the maintenance record");
const RECOMMENDATIONS: OpErrors = OpErrors::new("Could not load recommendations");

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Production implementation of [`MaintenanceRepository`].
pub struct RestMaintenanceRepository {
    api: Arc<ApiClient>,
}

impl RestMaintenanceRepository {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl MaintenanceRepository for RestMaintenanceRepository {
    async fn list_records(
        &self,
        vehicle_id: Option<&str>,
    ) -> Result<Vec<MaintenanceRecord>, ApiError> {
        let response = match vehicle_id {
            Some(id) => {
                self.api
                    .get_query("/maintenance/records", &[("vehicle_id", id.to_string())])
                    .await?
            }
            None => self.api.get("/maintenance/records").await?,
        };
        let response = ensure_success(response, &LOAD)?;
        let envelope: ItemsEnvelope<MaintenanceRecordDto> = response.json()?;
        Ok(envelope
            .items
            .into_iter()
            .map(MaintenanceRecordDto::into_domain)
            .collect())
    }

    async fn create_record(
        &self,
        request: NewMaintenanceRecord,
    ) -> Result<MaintenanceRecord, ApiError> {
        let body = NewMaintenanceRecordDto::from(request);
        let response =
            ensure_success(self.api.post("/maintenance/records", &body).await?, &SAVE)?;
        let envelope: MaintenanceRecordEnvelope = response.json()?;
        Ok(envelope.record.into_domain())
    }

    async fn update_record(
        &self,
        id: &str,
        update: MaintenanceRecordUpdate,
    ) -> Result<MaintenanceRecord, ApiError> {
        let path = format!("/maintenance/records/{}", id);
        let body = MaintenanceRecordUpdateDto::from(update);
        let response = ensure_success(self.api.patch(&path, &body).await?, &SAVE)?;
        let envelope: MaintenanceRecordEnvelope = response.json()?;
        Ok(envelope.record.into_domain())
    }

    async fn delete_record(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/maintenance/records/{}", id);
        ensure_success(self.api.delete(&path).await?, &DELETE)?;
        Ok(())
    }

    async fn list_recommendations(
        &self,
        vehicle_id: Option<&str>,
    ) -> Result<Vec<MaintenanceRecommendation>, ApiError> {
        let response = match vehicle_id {
            Some(id) => {
                self.api
                    .get_query(
                        "/maintenance/recommendations",
                        &[("vehicle_id", id.to_string())],
                    )
                    .await?
            }
            None => self.api.get("/maintenance/recommendations").await?,
        };
        let response = ensure_success(response, &RECOMMENDATIONS)?;
        let envelope: ItemsEnvelope<RecommendationDto> = response.json()?;
        Ok(envelope
            .items
            .into_iter()
            .map(RecommendationDto::into_domain)
            .collect())
    }
}

// ----- Wire Types -----

#[derive(Debug, Deserialize)]
struct MaintenanceRecordEnvelope {
    record: MaintenanceRecordDto,
}

#[derive(Debug, Default, Deserialize)]
struct MaintenanceRecordDto {
    id: Option<String>,
    vehicle_id: Option<String>,
    description: Option<String>,
    performed_at: Option<String>,
    mileage_km: Option<u32>,
    cost_cents: Option<u64>,
}

impl MaintenanceRecordDto {
    fn into_domain(self) -> MaintenanceRecord {
        MaintenanceRecord {
            id: self.id.unwrap_or_default(),
            vehicle_id: self.vehicle_id.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            performed_at: self.performed_at.as_deref().and_then(parse_date),
            mileage_km: self.mileage_km.unwrap_or_default(),
            cost_cents: self.cost_cents.unwrap_or_default(),
        }
    }
}

/// Lenient date parse; an unreadable date maps to `None`.
fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

#[derive(Debug, Serialize)]
struct NewMaintenanceRecordDto {
    vehicle_id: String,
    description: String,
    performed_at: String,
    mileage_km: u32,
    cost_cents: u64,
}

impl From<NewMaintenanceRecord> for NewMaintenanceRecordDto {
    fn from(request: NewMaintenanceRecord) -> Self {
        Self {
            vehicle_id: request.vehicle_id,
            description: request.description,
            performed_at: request.performed_at.format(DATE_FORMAT).to_string(),
            mileage_km: request.mileage_km,
            cost_cents: request.cost_cents,
        }
    }
}

#[derive(Debug, Serialize)]
struct MaintenanceRecordUpdateDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    performed_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mileage_km: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cost_cents: Option<u64>,
}

impl From<MaintenanceRecordUpdate> for MaintenanceRecordUpdateDto {
    fn from(update: MaintenanceRecordUpdate) -> Self {
        Self {
            description: update.description,
            performed_at: update
                .performed_at
                .map(|d| d.format(DATE_FORMAT).to_string()),
            mileage_km: update.mileage_km,
            cost_cents: update.cost_cents,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RecommendationDto {
    id: Option<String>,
    vehicle_id: Option<String>,
    title: Option<String>,
    detail: Option<String>,
    due_date: Option<String>,
    due_mileage_km: Option<u32>,
}

impl RecommendationDto {
    fn into_domain(self) -> MaintenanceRecommendation {
        MaintenanceRecommendation {
            id: self.id.unwrap_or_default(),
            vehicle_id: self.vehicle_id.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            detail: self.detail.unwrap_or_default(),
            due_date: self.due_date.as_deref().and_then(parse_date),
            due_mileage_km: self.due_mileage_km,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_dto_maps_full_payload_preserving_ids() {
        let dto: MaintenanceRecordDto = serde_json::from_str(
            r#"{
                "id": "m1", "vehicle_id": "v1", "description": "Oil change",
                "performed_at": "2026-05-10", "mileage_km": 40000, "cost_cents": 8900
            }"#,
        )
        .unwrap();
        let record = dto.into_domain();
        assert_eq!(record.id, "m1");
        assert_eq!(record.vehicle_id, "v1");
        assert_eq!(record.performed_at, Some("2026-05-10".parse().unwrap()));
    }

    #[test]
    fn record_dto_tolerates_unreadable_date() {
        let dto: MaintenanceRecordDto =
            serde_json::from_str(r#"{"id": "m1", "performed_at": "10/05/2026"}"#).unwrap();
        assert!(dto.into_domain().performed_at.is_none());
    }

    #[test]
    fn new_record_dto_formats_the_date() {
        let request = NewMaintenanceRecord {
            vehicle_id: "v1".to_string(),
            description: "Oil change".to_string(),
            performed_at: "2026-05-10".parse().unwrap(),
            mileage_km: 40_000,
            cost_cents: 8900,
        };
        let json = serde_json::to_value(NewMaintenanceRecordDto::from(request)).unwrap();
        assert_eq!(json["performed_at"], "2026-05-10");
    }

    #[test]
    fn update_dto_serializes_only_present_fields() {
        let update = MaintenanceRecordUpdate::new().cost_cents(9900);
        let json = serde_json::to_value(MaintenanceRecordUpdateDto::from(update)).unwrap();
        assert_eq!(json, serde_json::json!({ "cost_cents": 9900 }));
    }

    #[test]
    fn recommendation_dto_keeps_due_mileage_optional() {
        let dto: RecommendationDto =
            serde_json::from_str(r#"{"id": "r1", "title": "Brake check"}"#).unwrap();
        let recommendation = dto.into_domain();
        assert_eq!(recommendation.id, "r1");
        assert!(recommendation.due_mileage_km.is_none());
        assert!(recommendation.due_date.is_none());
    }
}
