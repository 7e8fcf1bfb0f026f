//! Maintenance screen state container for a single vehicle.
//!
//! Shows the vehicle's maintenance history alongside its backend-computed
//! recommendations. The add form parses date, mileage and cost locally so
//! malformed input never produces a request.

use chrono::NaiveDate;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use crate::domain::{MaintenanceRecommendation, MaintenanceRecord};
use crate::ports::{MaintenanceRepository, NewMaintenanceRecord};

/// Wire format for dates typed into the add form.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Immutable snapshot of the maintenance screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaintenanceUiState {
    pub records: Vec<MaintenanceRecord>,
    pub recommendations: Vec<MaintenanceRecommendation>,
    pub is_loading: bool,
    pub is_saving: bool,
    pub error: Option<String>,
}

/// State container for one vehicle's maintenance screen.
pub struct MaintenanceScreen {
    maintenance: Arc<dyn MaintenanceRepository>,
    vehicle_id: String,
    state: watch::Sender<MaintenanceUiState>,
    load_seq: AtomicU64,
}

impl MaintenanceScreen {
    pub fn new(maintenance: Arc<dyn MaintenanceRepository>, vehicle_id: impl Into<String>) -> Self {
        let (state, _) = watch::channel(MaintenanceUiState::default());
        Self {
            maintenance,
            vehicle_id: vehicle_id.into(),
            state,
            load_seq: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<MaintenanceUiState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> MaintenanceUiState {
        self.state.borrow().clone()
    }

    /// Reloads records and recommendations for the vehicle; a superseded
    /// reload is discarded.
    pub async fn load(&self) {
        let seq = self.load_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
        });

        let (records, recommendations) = tokio::join!(
            self.maintenance.list_records(Some(&self.vehicle_id)),
            self.maintenance.list_recommendations(Some(&self.vehicle_id)),
        );

        if self.load_seq.load(Ordering::SeqCst) != seq {
            return;
        }

        self.state.send_modify(|s| {
            s.is_loading = false;
            match (records, recommendations) {
                (Ok(records), Ok(recommendations)) => {
                    s.records = records;
                    s.recommendations = recommendations;
                }
                (Err(e), _) | (_, Err(e)) => s.error = Some(e.message().to_string()),
            }
        });
    }

    /// Parses the form fields locally, then logs a maintenance record.
    pub async fn add_record(&self, description: &str, date: &str, mileage: &str, cost: &str) {
        let request = match build_record(&self.vehicle_id, description, date, mileage, cost) {
            Ok(request) => request,
            Err(message) => {
                self.state.send_modify(|s| s.error = Some(message));
                return;
            }
        };

        self.state.send_modify(|s| {
            s.is_saving = true;
            s.error = None;
        });

        match self.maintenance.create_record(request).await {
            Ok(record) => self.state.send_modify(|s| {
                s.is_saving = false;
                s.records.push(record);
            }),
            Err(e) => self.state.send_modify(|s| {
                s.is_saving = false;
                s.error = Some(e.message().to_string());
            }),
        }
    }

    /// Deletes a record and removes it from the snapshot on success.
    pub async fn delete_record(&self, id: &str) {
        match self.maintenance.delete_record(id).await {
            Ok(()) => self
                .state
                .send_modify(|s| s.records.retain(|r| r.id != id)),
            Err(e) => self
                .state
                .send_modify(|s| s.error = Some(e.message().to_string())),
        }
    }
}

fn build_record(
    vehicle_id: &str,
    description: &str,
    date: &str,
    mileage: &str,
    cost: &str,
) -> Result<NewMaintenanceRecord, String> {
    let description = description.trim();
    if description.is_empty() {
        return Err("Description is required".to_string());
    }
    let performed_at = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map_err(|_| "Enter a valid date (YYYY-MM-DD)".to_string())?;
    let mileage_km: u32 = mileage
        .trim()
        .parse()
        .map_err(|_| "Enter a valid mileage".to_string())?;
    let cost_cents: u64 = cost
        .trim()
        .parse()
        .map_err(|_| "Enter a valid cost".to_string())?;
    Ok(NewMaintenanceRecord {
        vehicle_id: vehicle_id.to_string(),
        description: description.to_string(),
        performed_at,
        mileage_km,
        cost_cents,
    })
}
