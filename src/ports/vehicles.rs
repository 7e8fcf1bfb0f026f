//! Vehicle repository port.

use async_trait::async_trait;

use crate::domain::{ApiError, Vehicle, VehicleMake};

/// Port for the vehicle endpoints, including the makes catalog that powers
/// the registration make/model cascade.
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Vehicle>, ApiError>;

    async fn get(&self, id: &str) -> Result<Vehicle, ApiError>;

    async fn create(&self, request: NewVehicle) -> Result<Vehicle, ApiError>;

    /// Partial update; only fields present in `update` are sent.
    async fn update(&self, id: &str, update: VehicleUpdate) -> Result<Vehicle, ApiError>;

    async fn delete(&self, id: &str) -> Result<(), ApiError>;

    /// The makes catalog with nested models.
    async fn makes(&self) -> Result<Vec<VehicleMake>, ApiError>;
}

/// Payload for registering a vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVehicle {
    pub make: String,
    pub model: String,
    pub year: u16,
    pub plate: String,
    pub color: Option<String>,
    pub mileage_km: u32,
}

/// Field update set for a PATCH on a vehicle.
///
/// Each `Some` field is serialized; `None` fields are omitted entirely, so
/// the backend only touches what the user actually changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleUpdate {
    pub plate: Option<String>,
    pub color: Option<String>,
    pub mileage_km: Option<u32>,
}

impl VehicleUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plate(mut self, plate: impl Into<String>) -> Self {
        self.plate = Some(plate.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn mileage_km(mut self, mileage_km: u32) -> Self {
        self.mileage_km = Some(mileage_km);
        self
    }

    /// True when no field is set; callers skip the round trip entirely.
    pub fn is_empty(&self) -> bool {
        self.plate.is_none() && self.color.is_none() && self.mileage_km.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_builder_sets_only_requested_fields() {
        let update = VehicleUpdate::new().mileage_km(50_000);
        assert_eq!(update.mileage_km, Some(50_000));
        assert!(update.plate.is_none());
        assert!(update.color.is_none());
        assert!(!update.is_empty());
    }

    #[test]
    fn empty_update_is_detectable() {
        assert!(VehicleUpdate::new().is_empty());
    }
}
