//! Application layer - per-screen observable state containers.
//!
//! Each screen owns one immutable snapshot published through a `watch`
//! channel. Intents mutate the snapshot atomically; async intents validate
//! locally, flip a loading flag, await a repository, and fold the result
//! back in. Overlapping loads are sequence-numbered so a stale completion
//! never overwrites a newer one.

mod catalog;
mod garage;
mod login;
mod maintenance;
mod orders;
mod register;
mod vehicle_form;
mod workshop;

pub use catalog::{CatalogScreen, CatalogUiState};
pub use garage::{GarageScreen, GarageUiState};
pub use login::{LoginScreen, LoginUiState};
pub use maintenance::{MaintenanceScreen, MaintenanceUiState};
pub use orders::{OrdersScreen, OrdersUiState};
pub use register::{RegisterScreen, RegisterUiState};
pub use vehicle_form::{VehicleFormScreen, VehicleFormUiState};
pub use workshop::{WorkshopScreen, WorkshopUiState};
