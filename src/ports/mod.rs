//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! One repository port exists per backend capability group; every operation
//! returns `Result<T, ApiError>` and never lets a transport failure escape
//! as anything else. `TokenStore` abstracts the platform secret store.

mod auth;
mod maintenance;
mod orders;
mod parts;
mod reports;
mod service_orders;
mod token_store;
mod vehicles;

pub use auth::{AuthGateway, RegisterRequest};
pub use maintenance::{MaintenanceRecordUpdate, MaintenanceRepository, NewMaintenanceRecord};
pub use orders::{NewOrder, OrderRepository};
pub use parts::{NewPart, PartRepository, PartUpdate};
pub use reports::{ReportQuery, ReportRepository};
pub use service_orders::{NewServiceOrder, ServiceOrderRepository};
pub use token_store::TokenStore;
pub use vehicles::{NewVehicle, VehicleRepository, VehicleUpdate};
