//! Vehicle registration form state container.
//!
//! Drives the make/model cascade: the makes catalog is fetched once and the
//! model list is derived synchronously from it on every make change. Picking
//! a make that does not offer the currently selected model discards that
//! selection rather than submitting an impossible pairing.

use chrono::{Datelike, Utc};
use std::sync::Arc;
use tokio::sync::watch;

use crate::domain::{models_for_make, Vehicle, VehicleMake, VehicleModel};
use crate::ports::{NewVehicle, VehicleRepository};

/// Immutable snapshot of the vehicle registration form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleFormUiState {
    pub makes: Vec<VehicleMake>,
    pub available_models: Vec<VehicleModel>,
    pub selected_make_id: Option<String>,
    pub selected_model_id: Option<String>,
    pub year: String,
    pub plate: String,
    pub color: String,
    pub mileage: String,
    pub is_loading: bool,
    pub created_vehicle: Option<Vehicle>,
    pub error: Option<String>,
}

/// State container for the vehicle registration form.
pub struct VehicleFormScreen {
    vehicles: Arc<dyn VehicleRepository>,
    state: watch::Sender<VehicleFormUiState>,
}

impl VehicleFormScreen {
    pub fn new(vehicles: Arc<dyn VehicleRepository>) -> Self {
        let (state, _) = watch::channel(VehicleFormUiState::default());
        Self { vehicles, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<VehicleFormUiState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> VehicleFormUiState {
        self.state.borrow().clone()
    }

    /// Fetches the makes catalog that powers the cascade.
    pub async fn load_makes(&self) {
        self.state.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
        });

        match self.vehicles.makes().await {
            Ok(makes) => self.state.send_modify(|s| {
                s.is_loading = false;
                s.makes = makes;
            }),
            Err(e) => self.state.send_modify(|s| {
                s.is_loading = false;
                s.error = Some(e.message().to_string());
            }),
        }
    }

    /// Selects a make and restricts the model list to that make's models.
    pub fn select_make(&self, make_id: &str) {
        self.state.send_modify(|s| {
            s.selected_make_id = Some(make_id.to_string());
            s.available_models = models_for_make(&s.makes, make_id).to_vec();
            let still_offered = s
                .selected_model_id
                .as_ref()
                .map_or(false, |id| s.available_models.iter().any(|m| &m.id == id));
            if !still_offered {
                s.selected_model_id = None;
            }
            s.error = None;
        });
    }

    pub fn select_model(&self, model_id: &str) {
        self.state.send_modify(|s| {
            s.selected_model_id = Some(model_id.to_string());
            s.error = None;
        });
    }

    pub fn set_year(&self, year: &str) {
        self.state.send_modify(|s| {
            s.year = year.to_string();
            s.error = None;
        });
    }

    pub fn set_plate(&self, plate: &str) {
        self.state.send_modify(|s| {
            s.plate = plate.to_string();
            s.error = None;
        });
    }

    pub fn set_color(&self, color: &str) {
        self.state.send_modify(|s| {
            s.color = color.to_string();
            s.error = None;
        });
    }

    pub fn set_mileage(&self, mileage: &str) {
        self.state.send_modify(|s| {
            s.mileage = mileage.to_string();
            s.error = None;
        });
    }

    /// Validates the form locally, then registers the vehicle.
    pub async fn submit(&self) {
        let snapshot = self.state();

        let request = match build_request(&snapshot) {
            Ok(request) => request,
            Err(message) => {
                self.state.send_modify(|s| s.error = Some(message));
                return;
            }
        };

        self.state.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
        });

        match self.vehicles.create(request).await {
            Ok(vehicle) => self.state.send_modify(|s| {
                s.is_loading = false;
                s.created_vehicle = Some(vehicle);
            }),
            Err(e) => self.state.send_modify(|s| {
                s.is_loading = false;
                s.error = Some(e.message().to_string());
            }),
        }
    }
}

fn build_request(state: &VehicleFormUiState) -> Result<NewVehicle, String> {
    let make_id = state
        .selected_make_id
        .as_deref()
        .ok_or_else(|| "Select a make".to_string())?;
    let make = state
        .makes
        .iter()
        .find(|m| m.id == make_id)
        .ok_or_else(|| "Select a make".to_string())?;
    let model_id = state
        .selected_model_id
        .as_deref()
        .ok_or_else(|| "Select a model".to_string())?;
    let model = make
        .models
        .iter()
        .find(|m| m.id == model_id)
        .ok_or_else(|| "Select a model".to_string())?;

    let current_year = Utc::now().year() as u16;
    let year: u16 = state
        .year
        .trim()
        .parse()
        .map_err(|_| "Enter a valid year".to_string())?;
    if !(1900..=current_year + 1).contains(&year) {
        return Err("Enter a valid year".to_string());
    }

    let plate = state.plate.trim();
    if plate.is_empty() {
        return Err("Plate is required".to_string());
    }

    let mileage_km: u32 = state
        .mileage
        .trim()
        .parse()
        .map_err(|_| "Enter a valid mileage".to_string())?;

    let color = state.color.trim();
    Ok(NewVehicle {
        make: make.name.clone(),
        model: model.name.clone(),
        year,
        plate: plate.to_string(),
        color: (!color.is_empty()).then(|| color.to_string()),
        mileage_km,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockVehicleRepository;
    use crate::domain::ApiError;

    fn makes() -> Vec<VehicleMake> {
        vec![
            VehicleMake {
                id: "mk-vw".to_string(),
                name: "Volkswagen".to_string(),
                models: vec![
                    VehicleModel {
                        id: "md-golf".to_string(),
                        name: "Golf".to_string(),
                    },
                    VehicleModel {
                        id: "md-polo".to_string(),
                        name: "Polo".to_string(),
                    },
                ],
            },
            VehicleMake {
                id: "mk-re".to_string(),
                name: "Renault".to_string(),
                models: vec![VehicleModel {
                    id: "md-clio".to_string(),
                    name: "Clio".to_string(),
                }],
            },
        ]
    }

    async fn loaded_screen() -> (VehicleFormScreen, Arc<MockVehicleRepository>) {
        let vehicles = Arc::new(MockVehicleRepository::new().with_makes(makes()));
        let screen = VehicleFormScreen::new(vehicles.clone());
        screen.load_makes().await;
        (screen, vehicles)
    }

    fn fill_valid(screen: &VehicleFormScreen) {
        screen.select_make("mk-vw");
        screen.select_model("md-golf");
        screen.set_year("2019");
        screen.set_plate("AB-123-CD");
        screen.set_mileage("42000");
    }

    #[tokio::test]
    async fn selecting_a_make_restricts_the_model_list() {
        let (screen, _) = loaded_screen().await;
        screen.select_make("mk-vw");

        let models: Vec<_> = screen
            .state()
            .available_models
            .iter()
            .map(|m| m.name.clone())
            .collect();
        assert_eq!(models, vec!["Golf", "Polo"]);
    }

    #[tokio::test]
    async fn switching_make_discards_an_incompatible_model_selection() {
        let (screen, _) = loaded_screen().await;
        screen.select_make("mk-vw");
        screen.select_model("md-golf");

        screen.select_make("mk-re");

        let state = screen.state();
        assert!(state.selected_model_id.is_none());
        let models: Vec<_> = state
            .available_models
            .iter()
            .map(|m| m.name.clone())
            .collect();
        assert_eq!(models, vec!["Clio"]);
    }

    #[tokio::test]
    async fn submit_registers_the_vehicle() {
        let (screen, vehicles) = loaded_screen().await;
        fill_valid(&screen);
        screen.set_color("Blue");
        screen.submit().await;

        let state = screen.state();
        assert!(state.error.is_none());
        let created = state.created_vehicle.unwrap();
        assert_eq!(created.make, "Volkswagen");
        assert_eq!(created.model, "Golf");
        assert_eq!(created.color.as_deref(), Some("Blue"));
        assert_eq!(vehicles.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn blank_color_is_submitted_as_absent() {
        let (screen, _) = loaded_screen().await;
        fill_valid(&screen);
        screen.set_color("   ");
        screen.submit().await;

        let created = screen.state().created_vehicle.unwrap();
        assert!(created.color.is_none());
    }

    #[tokio::test]
    async fn missing_model_is_rejected_locally() {
        let (screen, vehicles) = loaded_screen().await;
        screen.select_make("mk-vw");
        screen.set_year("2019");
        screen.set_plate("AB-123-CD");
        screen.set_mileage("42000");
        screen.submit().await;

        assert_eq!(screen.state().error.as_deref(), Some("Select a model"));
        assert!(vehicles.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unparseable_year_is_rejected_locally() {
        let (screen, _) = loaded_screen().await;
        fill_valid(&screen);
        screen.set_year("next year");
        screen.submit().await;

        assert_eq!(screen.state().error.as_deref(), Some("Enter a valid year"));
    }

    #[tokio::test]
    async fn implausible_year_is_rejected_locally() {
        let (screen, _) = loaded_screen().await;
        fill_valid(&screen);
        screen.set_year("1850");
        screen.submit().await;

        assert_eq!(screen.state().error.as_deref(), Some("Enter a valid year"));
    }

    #[tokio::test]
    async fn backend_failure_surfaces_the_message() {
        let (screen, vehicles) = loaded_screen().await;
        vehicles.failures.push(ApiError::http(400, "Invalid data"));
        fill_valid(&screen);
        screen.submit().await;

        let state = screen.state();
        assert_eq!(state.error.as_deref(), Some("Invalid data"));
        assert!(state.created_vehicle.is_none());
    }
}
