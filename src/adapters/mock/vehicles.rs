//! Mock vehicle repository.

use async_trait::async_trait;
use std::sync::Mutex;
use uuid::Uuid;

use super::FailureInjector;
use crate::domain::{ApiError, Vehicle, VehicleMake};
use crate::ports::{NewVehicle, VehicleRepository, VehicleUpdate};

/// Fake [`VehicleRepository`] over in-memory state.
#[derive(Default)]
pub struct MockVehicleRepository {
    vehicles: Mutex<Vec<Vehicle>>,
    makes: Mutex<Vec<VehicleMake>>,
    pub failures: FailureInjector,
    list_calls: Mutex<usize>,
}

impl MockVehicleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vehicles(self, vehicles: Vec<Vehicle>) -> Self {
        *self.vehicles.lock().unwrap() = vehicles;
        self
    }

    pub fn with_makes(self, makes: Vec<VehicleMake>) -> Self {
        *self.makes.lock().unwrap() = makes;
        self
    }

    /// Number of `list` calls so far.
    pub fn list_call_count(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }
}

#[async_trait]
impl VehicleRepository for MockVehicleRepository {
    async fn list(&self) -> Result<Vec<Vehicle>, ApiError> {
        *self.list_calls.lock().unwrap() += 1;
        self.failures.take()?;
        Ok(self.vehicles.lock().unwrap().clone())
    }

    async fn get(&self, id: &str) -> Result<Vehicle, ApiError> {
        self.failures.take()?;
        self.vehicles
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(|| ApiError::http(404, "Not found"))
    }

    async fn create(&self, request: NewVehicle) -> Result<Vehicle, ApiError> {
        self.failures.take()?;
        let vehicle = Vehicle {
            id: Uuid::new_v4().to_string(),
            owner_id: "u1".to_string(),
            make: request.make,
            model: request.model,
            year: request.year,
            plate: request.plate,
            color: request.color,
            mileage_km: request.mileage_km,
        };
        self.vehicles.lock().unwrap().push(vehicle.clone());
        Ok(vehicle)
    }

    async fn update(&self, id: &str, update: VehicleUpdate) -> Result<Vehicle, ApiError> {
        self.failures.take()?;
        let mut vehicles = self.vehicles.lock().unwrap();
        let vehicle = vehicles
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| ApiError::http(404, "Not found"))?;
        if let Some(plate) = update.plate {
            vehicle.plate = plate;
        }
        if let Some(color) = update.color {
            vehicle.color = Some(color);
        }
        if let Some(mileage_km) = update.mileage_km {
            vehicle.mileage_km = mileage_km;
        }
        Ok(vehicle.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.failures.take()?;
        let mut vehicles = self.vehicles.lock().unwrap();
        let before = vehicles.len();
        vehicles.retain(|v| v.id != id);
        if vehicles.len() == before {
            return Err(ApiError::http(404, "Not found"));
        }
        Ok(())
    }

    async fn makes(&self) -> Result<Vec<VehicleMake>, ApiError> {
        self.failures.take()?;
        Ok(self.makes.lock().unwrap().clone())
    }
}
