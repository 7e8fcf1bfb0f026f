//! REST adapter for the vehicle endpoints.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::adapters::http::{ensure_success, ApiClient, ItemsEnvelope, OpErrors};
use crate::domain::{ApiError, Vehicle, VehicleMake, VehicleModel};
use crate::ports::{NewVehicle, VehicleRepository, VehicleUpdate};

const LOAD: OpErrors = OpErrors::new("Could not load vehicles");
const SAVE: OpErrors = OpErrors::new("Could not save the vehicle");
const DELETE: OpErrors = OpErrors::new("Could not delete the vehicle");
const MAKES: OpErrors = OpErrors::new("Could not load the makes catalog");

/// Production implementation of [`VehicleRepository`].
pub struct RestVehicleRepository {
    api: Arc<ApiClient>,
}

impl RestVehicleRepository {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl VehicleRepository for RestVehicleRepository {
    async fn list(&self) -> Result<Vec<Vehicle>, ApiError> {
        let response = ensure_success(self.api.get("/vehicles").await?, &LOAD)?;
        let envelope: ItemsEnvelope<VehicleDto> = response.json()?;
        Ok(envelope
            .items
            .into_iter()
            .map(VehicleDto::into_domain)
            .collect())
    }

    async fn get(&self, id: &str) -> Result<Vehicle, ApiError> {
        let path = format!("/vehicles/{}", id);
        let response = ensure_success(self.api.get(&path).await?, &LOAD)?;
        let envelope: VehicleEnvelope = response.json()?;
        Ok(envelope.vehicle.into_domain())
    }

    async fn create(&self, request: NewVehicle) -> Result<Vehicle, ApiError> {
        let body = NewVehicleDto::from(request);
        let response = ensure_success(self.api.post("/vehicles", &body).await?, &SAVE)?;
        let envelope: VehicleEnvelope = response.json()?;
        Ok(envelope.vehicle.into_domain())
    }

    async fn update(&self, id: &str, update: VehicleUpdate) -> Result<Vehicle, ApiError> {
        let path = format!("/vehicles/{}", id);
        let body = VehicleUpdateDto::from(update);
        let response = ensure_success(self.api.patch(&path, &body).await?, &SAVE)?;
        let envelope: VehicleEnvelope = response.json()?;
        Ok(envelope.vehicle.into_domain())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/vehicles/{}", id);
        ensure_success(self.api.delete(&path).await?, &DELETE)?;
        Ok(())
    }

    async fn makes(&self) -> Result<Vec<VehicleMake>, ApiError> {
        let response = ensure_success(self.api.get("/vehicles/makes").await?, &MAKES)?;
        let envelope: ItemsEnvelope<VehicleMakeDto> = response.json()?;
        Ok(envelope
            .items
            .into_iter()
            .map(VehicleMakeDto::into_domain)
            .collect())
    }
}

// ----- Wire Types -----

#[derive(Debug, Deserialize)]
struct VehicleEnvelope {
    vehicle: VehicleDto,
}

#[derive(Debug, Default, Deserialize)]
struct VehicleDto {
    id: Option<String>,
    owner_id: Option<String>,
    make: Option<String>,
    model: Option<String>,
    year: Option<u16>,
    plate: Option<String>,
    color: Option<String>,
    mileage_km: Option<u32>,
}

impl VehicleDto {
    fn into_domain(self) -> Vehicle {
        Vehicle {
            id: self.id.unwrap_or_default(),
            owner_id: self.owner_id.unwrap_or_default(),
            make: self.make.unwrap_or_default(),
            model: self.model.unwrap_or_default(),
            year: self.year.unwrap_or_default(),
            plate: self.plate.unwrap_or_default(),
            // Absent color is meaningful; no placeholder.
            color: self.color,
            mileage_km: self.mileage_km.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct NewVehicleDto {
    make: String,
    model: String,
    year: u16,
    plate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    mileage_km: u32,
}

impl From<NewVehicle> for NewVehicleDto {
    fn from(request: NewVehicle) -> Self {
        Self {
            make: request.make,
            model: request.model,
            year: request.year,
            plate: request.plate,
            color: request.color,
            mileage_km: request.mileage_km,
        }
    }
}

#[derive(Debug, Serialize)]
struct VehicleUpdateDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    plate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mileage_km: Option<u32>,
}

impl From<VehicleUpdate> for VehicleUpdateDto {
    fn from(update: VehicleUpdate) -> Self {
        Self {
            plate: update.plate,
            color: update.color,
            mileage_km: update.mileage_km,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct VehicleMakeDto {
    id: Option<String>,
    name: Option<String>,
    #[serde(default)]
    models: Vec<VehicleModelDto>,
}

impl VehicleMakeDto {
    fn into_domain(self) -> VehicleMake {
        VehicleMake {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            models: self
                .models
                .into_iter()
                .map(VehicleModelDto::into_domain)
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct VehicleModelDto {
    id: Option<String>,
    name: Option<String>,
}

impl VehicleModelDto {
    fn into_domain(self) -> VehicleModel {
        VehicleModel {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vehicle_dto_maps_full_payload_preserving_id() {
        let dto: VehicleDto = serde_json::from_str(
            r#"{
                "id": "v1", "owner_id": "u1", "make": "Volkswagen",
                "model": "Golf", "year": 2019, "plate": "AB-123-CD",
                "color": "blue", "mileage_km": 42000
            }"#,
        )
        .unwrap();
        let vehicle = dto.into_domain();
        assert_eq!(vehicle.id, "v1");
        assert_eq!(vehicle.owner_id, "u1");
        assert_eq!(vehicle.color.as_deref(), Some("blue"));
        assert_eq!(vehicle.title(), "Volkswagen Golf");
    }

    #[test]
    fn mapped_vehicle_serializes_back_with_the_same_id() {
        let dto: VehicleDto =
            serde_json::from_str(r#"{"id": "v1", "make": "Volkswagen"}"#).unwrap();
        let json = serde_json::to_value(dto.into_domain()).unwrap();
        assert_eq!(json["id"], "v1");
        assert_eq!(json["make"], "Volkswagen");
    }

    #[test]
    fn vehicle_dto_substitutes_defaults_but_keeps_color_absent() {
        let dto: VehicleDto = serde_json::from_str(r#"{"id": "v1"}"#).unwrap();
        let vehicle = dto.into_domain();
        assert_eq!(vehicle.id, "v1");
        assert_eq!(vehicle.make, "");
        assert_eq!(vehicle.year, 0);
        assert_eq!(vehicle.color, None);
    }

    #[test]
    fn update_dto_serializes_only_present_fields() {
        let update = VehicleUpdate::new().mileage_km(50_000);
        let json = serde_json::to_value(VehicleUpdateDto::from(update)).unwrap();
        assert_eq!(json, serde_json::json!({ "mileage_km": 50000 }));
    }

    #[test]
    fn make_dto_defaults_models_to_empty() {
        let dto: VehicleMakeDto =
            serde_json::from_str(r#"{"id": "mk1", "name": "Volkswagen"}"#).unwrap();
        let make = dto.into_domain();
        assert_eq!(make.id, "mk1");
        assert!(make.models.is_empty());
    }

    #[test]
    fn new_vehicle_dto_round_trips_stable_fields() {
        let request = NewVehicle {
            make: "Volkswagen".to_string(),
            model: "Golf".to_string(),
            year: 2019,
            plate: "AB-123-CD".to_string(),
            color: None,
            mileage_km: 42_000,
        };
        let json = serde_json::to_value(NewVehicleDto::from(request)).unwrap();
        assert_eq!(json["plate"], "AB-123-CD");
        assert!(json.get("color").is_none());
    }
}
