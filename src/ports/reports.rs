//! Report download port.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{ApiError, ServiceOrderStatus};

/// Port for the PDF report endpoint.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Downloads the service report as raw PDF bytes.
    async fn download(&self, query: ReportQuery) -> Result<Vec<u8>, ApiError>;
}

/// Date range and status filter for report generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub status: Option<ServiceOrderStatus>,
}

impl ReportQuery {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from,
            to,
            status: None,
        }
    }

    pub fn with_status(mut self, status: ServiceOrderStatus) -> Self {
        self.status = Some(status);
        self
    }
}
