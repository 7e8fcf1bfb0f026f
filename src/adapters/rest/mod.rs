//! REST adapters - production implementations of the repository ports.
//!
//! One adapter per port; wire DTOs live at the bottom of each adapter file
//! together with their domain mapping. Every operation normalizes failures
//! through the transport layer's error extraction.

mod auth;
mod maintenance;
mod orders;
mod parts;
mod reports;
mod service_orders;
mod vehicles;

pub use auth::RestAuthGateway;
pub use maintenance::RestMaintenanceRepository;
pub use orders::RestOrderRepository;
pub use parts::RestPartRepository;
pub use reports::RestReportRepository;
pub use service_orders::RestServiceOrderRepository;
pub use vehicles::RestVehicleRepository;
