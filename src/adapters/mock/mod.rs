//! Mock repository adapters for testing.
//!
//! In-memory fakes of every repository port, with error injection and call
//! tracking, so state containers and screen flows can be exercised without
//! a backend.

mod auth;
mod maintenance;
mod orders;
mod parts;
mod reports;
mod service_orders;
mod vehicles;

pub use auth::MockAuthGateway;
pub use maintenance::MockMaintenanceRepository;
pub use orders::MockOrderRepository;
pub use parts::MockPartRepository;
pub use reports::MockReportRepository;
pub use service_orders::MockServiceOrderRepository;
pub use vehicles::MockVehicleRepository;

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::domain::ApiError;

/// Queue of failures to inject into upcoming calls.
///
/// Each queued error fails exactly one call; once the queue is empty, calls
/// succeed against the fake's in-memory state.
#[derive(Debug, Default)]
pub struct FailureInjector {
    queue: Mutex<VecDeque<ApiError>>,
}

impl FailureInjector {
    /// Queues an error for the next call.
    pub fn push(&self, error: ApiError) {
        self.queue.lock().unwrap().push_back(error);
    }

    /// Pops a queued error, failing the current call if one is present.
    pub fn take(&self) -> Result<(), ApiError> {
        match self.queue.lock().unwrap().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injector_fails_exactly_once_per_queued_error() {
        let injector = FailureInjector::default();
        injector.push(ApiError::network("boom"));

        assert!(injector.take().is_err());
        assert!(injector.take().is_ok());
    }
}
