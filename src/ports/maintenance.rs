//! Maintenance repository port.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{ApiError, MaintenanceRecommendation, MaintenanceRecord};

/// Port for maintenance history and recommendation endpoints.
#[async_trait]
pub trait MaintenanceRepository: Send + Sync {
    /// Maintenance records, optionally scoped to one vehicle.
    async fn list_records(&self, vehicle_id: Option<&str>)
        -> Result<Vec<MaintenanceRecord>, ApiError>;

    async fn create_record(&self, request: NewMaintenanceRecord)
        -> Result<MaintenanceRecord, ApiError>;

    /// Partial update; only fields present in `update` are sent.
    async fn update_record(
        &self,
        id: &str,
        update: MaintenanceRecordUpdate,
    ) -> Result<MaintenanceRecord, ApiError>;

    async fn delete_record(&self, id: &str) -> Result<(), ApiError>;

    /// Backend-computed recommendations, optionally scoped to one vehicle.
    async fn list_recommendations(
        &self,
        vehicle_id: Option<&str>,
    ) -> Result<Vec<MaintenanceRecommendation>, ApiError>;
}

/// Payload for logging a maintenance action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMaintenanceRecord {
    pub vehicle_id: String,
    pub description: String,
    pub performed_at: NaiveDate,
    pub mileage_km: u32,
    pub cost_cents: u64,
}

/// Field update set for a PATCH on a maintenance record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaintenanceRecordUpdate {
    pub description: Option<String>,
    pub performed_at: Option<NaiveDate>,
    pub mileage_km: Option<u32>,
    pub cost_cents: Option<u64>,
}

impl MaintenanceRecordUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn performed_at(mut self, performed_at: NaiveDate) -> Self {
        self.performed_at = Some(performed_at);
        self
    }

    pub fn mileage_km(mut self, mileage_km: u32) -> Self {
        self.mileage_km = Some(mileage_km);
        self
    }

    pub fn cost_cents(mut self, cost_cents: u64) -> Self {
        self.cost_cents = Some(cost_cents);
        self
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.performed_at.is_none()
            && self.mileage_km.is_none()
            && self.cost_cents.is_none()
    }
}
