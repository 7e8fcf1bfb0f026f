//! Mock maintenance repository.

use async_trait::async_trait;
use std::sync::Mutex;
use uuid::Uuid;

use super::FailureInjector;
use crate::domain::{ApiError, MaintenanceRecommendation, MaintenanceRecord};
use crate::ports::{MaintenanceRecordUpdate, MaintenanceRepository, NewMaintenanceRecord};

/// Fake [`MaintenanceRepository`] over in-memory state.
#[derive(Default)]
pub struct MockMaintenanceRepository {
    records: Mutex<Vec<MaintenanceRecord>>,
    recommendations: Mutex<Vec<MaintenanceRecommendation>>,
    pub failures: FailureInjector,
}

impl MockMaintenanceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(self, records: Vec<MaintenanceRecord>) -> Self {
        *self.records.lock().unwrap() = records;
        self
    }

    pub fn with_recommendations(self, recommendations: Vec<MaintenanceRecommendation>) -> Self {
        *self.recommendations.lock().unwrap() = recommendations;
        self
    }
}

#[async_trait]
impl MaintenanceRepository for MockMaintenanceRepository {
    async fn list_records(
        &self,
        vehicle_id: Option<&str>,
    ) -> Result<Vec<MaintenanceRecord>, ApiError> {
        self.failures.take()?;
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| vehicle_id.map_or(true, |id| r.vehicle_id == id))
            .cloned()
            .collect())
    }

    async fn create_record(
        &self,
        request: NewMaintenanceRecord,
    ) -> Result<MaintenanceRecord, ApiError> {
        self.failures.take()?;
        let record = MaintenanceRecord {
            id: Uuid::new_v4().to_string(),
            vehicle_id: request.vehicle_id,
            description: request.description,
            performed_at: Some(request.performed_at),
            mileage_km: request.mileage_km,
            cost_cents: request.cost_cents,
        };
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update_record(
        &self,
        id: &str,
        update: MaintenanceRecordUpdate,
    ) -> Result<MaintenanceRecord, ApiError> {
        self.failures.take()?;
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ApiError::http(404, "Not found"))?;
        if let Some(description) = update.description {
            record.description = description;
        }
        if let Some(performed_at) = update.performed_at {
            record.performed_at = Some(performed_at);
        }
        if let Some(mileage_km) = update.mileage_km {
            record.mileage_km = mileage_km;
        }
        if let Some(cost_cents) = update.cost_cents {
            record.cost_cents = cost_cents;
        }
        Ok(record.clone())
    }

    async fn delete_record(&self, id: &str) -> Result<(), ApiError> {
        self.failures.take()?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(ApiError::http(404, "Not found"));
        }
        Ok(())
    }

    async fn list_recommendations(
        &self,
        vehicle_id: Option<&str>,
    ) -> Result<Vec<MaintenanceRecommendation>, ApiError> {
        self.failures.take()?;
        let recommendations = self.recommendations.lock().unwrap();
        Ok(recommendations
            .iter()
            .filter(|r| vehicle_id.map_or(true, |id| r.vehicle_id == id))
            .cloned()
            .collect())
    }
}
