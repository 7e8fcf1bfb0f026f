//! Garage screen state container: the user's vehicles plus upcoming
//! maintenance reminders.
//!
//! The two slices load independently and write into the same snapshot via
//! field-scoped updates, so a vehicles refresh can never clobber the
//! reminders fields or vice versa. Overlapping reloads of one slice are
//! sequence-numbered: a completion that is no longer the latest is
//! discarded instead of racing last-write-wins.

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use crate::domain::{upcoming_reminders, MaintenanceRecommendation, Vehicle};
use crate::ports::{MaintenanceRepository, VehicleRepository};

/// Reminders further out than this many days are not surfaced.
const REMINDER_HORIZON_DAYS: i64 = 60;

/// Immutable snapshot of the garage screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GarageUiState {
    pub vehicles: Vec<Vehicle>,
    pub reminders: Vec<MaintenanceRecommendation>,
    pub is_loading_vehicles: bool,
    pub is_loading_reminders: bool,
    pub vehicles_error: Option<String>,
    pub reminders_error: Option<String>,
    pub selected_vehicle_id: Option<String>,
}

/// State container for the garage screen.
pub struct GarageScreen {
    vehicles: Arc<dyn VehicleRepository>,
    maintenance: Arc<dyn MaintenanceRepository>,
    state: watch::Sender<GarageUiState>,
    vehicles_seq: AtomicU64,
    reminders_seq: AtomicU64,
}

impl GarageScreen {
    pub fn new(
        vehicles: Arc<dyn VehicleRepository>,
        maintenance: Arc<dyn MaintenanceRepository>,
    ) -> Self {
        let (state, _) = watch::channel(GarageUiState::default());
        Self {
            vehicles,
            maintenance,
            state,
            vehicles_seq: AtomicU64::new(0),
            reminders_seq: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<GarageUiState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> GarageUiState {
        self.state.borrow().clone()
    }

    /// Initial load: both slices concurrently.
    pub async fn load(&self) {
        tokio::join!(self.load_vehicles(), self.load_reminders());
    }

    /// Reloads the vehicles slice.
    pub async fn load_vehicles(&self) {
        let seq = self.vehicles_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|s| {
            s.is_loading_vehicles = true;
            s.vehicles_error = None;
        });

        let result = self.vehicles.list().await;

        // A newer reload superseded this one; drop the stale result.
        if self.vehicles_seq.load(Ordering::SeqCst) != seq {
            return;
        }

        self.state.send_modify(|s| {
            s.is_loading_vehicles = false;
            match result {
                Ok(vehicles) => s.vehicles = vehicles,
                Err(e) => s.vehicles_error = Some(e.message().to_string()),
            }
        });
    }

    /// Reloads the reminders slice.
    pub async fn load_reminders(&self) {
        let seq = self.reminders_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|s| {
            s.is_loading_reminders = true;
            s.reminders_error = None;
        });

        let result = self.maintenance.list_recommendations(None).await;

        if self.reminders_seq.load(Ordering::SeqCst) != seq {
            return;
        }

        self.state.send_modify(|s| {
            s.is_loading_reminders = false;
            match result {
                Ok(recommendations) => {
                    let today = Utc::now().date_naive();
                    s.reminders =
                        upcoming_reminders(&recommendations, today, REMINDER_HORIZON_DAYS);
                }
                Err(e) => s.reminders_error = Some(e.message().to_string()),
            }
        });
    }

    pub fn select_vehicle(&self, id: &str) {
        self.state
            .send_modify(|s| s.selected_vehicle_id = Some(id.to_string()));
    }

    /// Deletes a vehicle and removes it from the snapshot on success.
    pub async fn delete_vehicle(&self, id: &str) {
        match self.vehicles.delete(id).await {
            Ok(()) => self.state.send_modify(|s| {
                s.vehicles.retain(|v| v.id != id);
                if s.selected_vehicle_id.as_deref() == Some(id) {
                    s.selected_vehicle_id = None;
                }
            }),
            Err(e) => self
                .state
                .send_modify(|s| s.vehicles_error = Some(e.message().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockMaintenanceRepository, MockVehicleRepository};
    use crate::domain::ApiError;
    use chrono::Duration;

    fn vehicle(id: &str) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            owner_id: "u1".to_string(),
            make: "Volkswagen".to_string(),
            model: "Golf".to_string(),
            year: 2019,
            plate: "AB-123-CD".to_string(),
            color: None,
            mileage_km: 42_000,
        }
    }

    fn reminder(id: &str, days_from_now: i64) -> MaintenanceRecommendation {
        MaintenanceRecommendation {
            id: id.to_string(),
            vehicle_id: "v1".to_string(),
            title: "Oil change".to_string(),
            detail: String::new(),
            due_date: Some(Utc::now().date_naive() + Duration::days(days_from_now)),
            due_mileage_km: None,
        }
    }

    fn screen(
        vehicles: Arc<MockVehicleRepository>,
        maintenance: Arc<MockMaintenanceRepository>,
    ) -> GarageScreen {
        GarageScreen::new(vehicles, maintenance)
    }

    #[tokio::test]
    async fn load_fills_both_slices() {
        let vehicles = Arc::new(
            MockVehicleRepository::new().with_vehicles(vec![vehicle("v1"), vehicle("v2")]),
        );
        let maintenance = Arc::new(
            MockMaintenanceRepository::new()
                .with_recommendations(vec![reminder("r1", 10), reminder("r2", 400)]),
        );
        let screen = screen(vehicles, maintenance);
        screen.load().await;

        let state = screen.state();
        assert_eq!(state.vehicles.len(), 2);
        // r2 is past the horizon and filtered out.
        assert_eq!(state.reminders.len(), 1);
        assert_eq!(state.reminders[0].id, "r1");
        assert!(!state.is_loading_vehicles);
        assert!(!state.is_loading_reminders);
    }

    #[tokio::test]
    async fn one_slice_failing_does_not_clobber_the_other() {
        let vehicles =
            Arc::new(MockVehicleRepository::new().with_vehicles(vec![vehicle("v1")]));
        let maintenance = Arc::new(MockMaintenanceRepository::new());
        maintenance.failures.push(ApiError::network(""));
        let screen = screen(vehicles, maintenance);
        screen.load().await;

        let state = screen.state();
        assert_eq!(state.vehicles.len(), 1);
        assert!(state.vehicles_error.is_none());
        assert_eq!(state.reminders_error.as_deref(), Some("Connection error"));
    }

    #[tokio::test]
    async fn reload_recovers_after_a_failure() {
        let vehicles =
            Arc::new(MockVehicleRepository::new().with_vehicles(vec![vehicle("v1")]));
        vehicles.failures.push(ApiError::network(""));
        let maintenance = Arc::new(MockMaintenanceRepository::new());
        let screen = screen(vehicles.clone(), maintenance);

        screen.load_vehicles().await;
        assert!(screen.state().vehicles_error.is_some());

        screen.load_vehicles().await;
        let state = screen.state();
        assert!(state.vehicles_error.is_none());
        assert_eq!(state.vehicles.len(), 1);
        assert_eq!(vehicles.list_call_count(), 2);
    }

    #[tokio::test]
    async fn delete_removes_the_vehicle_and_clears_selection() {
        let vehicles = Arc::new(
            MockVehicleRepository::new().with_vehicles(vec![vehicle("v1"), vehicle("v2")]),
        );
        let maintenance = Arc::new(MockMaintenanceRepository::new());
        let screen = screen(vehicles, maintenance);
        screen.load().await;
        screen.select_vehicle("v1");

        screen.delete_vehicle("v1").await;

        let state = screen.state();
        assert_eq!(state.vehicles.len(), 1);
        assert_eq!(state.vehicles[0].id, "v2");
        assert!(state.selected_vehicle_id.is_none());
    }

    #[tokio::test]
    async fn delete_failure_keeps_the_list_and_surfaces_the_error() {
        let vehicles =
            Arc::new(MockVehicleRepository::new().with_vehicles(vec![vehicle("v1")]));
        let maintenance = Arc::new(MockMaintenanceRepository::new());
        let screen = screen(vehicles.clone(), maintenance);
        screen.load().await;

        vehicles.failures.push(ApiError::http(404, "Not found"));
        screen.delete_vehicle("v1").await;

        let state = screen.state();
        assert_eq!(state.vehicles.len(), 1);
        assert_eq!(state.vehicles_error.as_deref(), Some("Not found"));
    }

    #[tokio::test]
    async fn identical_reloads_yield_structurally_equal_lists() {
        let vehicles = Arc::new(
            MockVehicleRepository::new().with_vehicles(vec![vehicle("v1"), vehicle("v2")]),
        );
        let maintenance = Arc::new(MockMaintenanceRepository::new());
        let screen = screen(vehicles, maintenance);

        screen.load_vehicles().await;
        let first = screen.state().vehicles;
        screen.load_vehicles().await;
        let second = screen.state().vehicles;
        assert_eq!(first, second);
    }
}
