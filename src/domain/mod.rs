//! Domain layer - immutable entities and pure derived-state functions.
//!
//! Entities are plain value records with opaque string ids; relationships
//! are foreign-key references only, with no client-side integrity checks.

mod error;
mod maintenance;
mod order;
mod part;
mod service_order;
mod user;
mod vehicle;

pub use error::{ApiError, CONNECTION_ERROR};
pub use maintenance::{upcoming_reminders, MaintenanceRecommendation, MaintenanceRecord};
pub use order::{Order, OrderStatus};
pub use part::{categories, filter_parts, Part};
pub use service_order::{ServiceOrder, ServiceOrderStatus};
pub use user::{User, UserRole};
pub use vehicle::{models_for_make, Vehicle, VehicleMake, VehicleModel};
