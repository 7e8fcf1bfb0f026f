//! Vehicle entities and the make/model selection cascade.

use serde::{Deserialize, Serialize};

/// A vehicle registered by the user.
///
/// Relationships are by id reference only; `owner_id` points at a
/// [`crate::domain::User`] without any client-side integrity checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub owner_id: String,
    pub make: String,
    pub model: String,
    pub year: u16,
    pub plate: String,
    /// `None` when the backend has no color on record; absence is meaningful
    /// here, so no placeholder is substituted.
    pub color: Option<String>,
    pub mileage_km: u32,
}

impl Vehicle {
    /// Display title derived from make and model ("Volkswagen Golf").
    pub fn title(&self) -> String {
        format!("{} {}", self.make, self.model).trim().to_string()
    }
}

/// A manufacturer entry from the makes catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleMake {
    pub id: String,
    pub name: String,
    pub models: Vec<VehicleModel>,
}

/// A model belonging to a make.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleModel {
    pub id: String,
    pub name: String,
}

/// Models available under the selected make, or empty when no make matches.
///
/// Recomputed synchronously from the already-loaded makes catalog on every
/// selection change; never fetched separately.
pub fn models_for_make<'a>(makes: &'a [VehicleMake], make_id: &str) -> &'a [VehicleModel] {
    makes
        .iter()
        .find(|m| m.id == make_id)
        .map(|m| m.models.as_slice())
        .unwrap_or(&[])
}
