//! Mock report repository.

use async_trait::async_trait;
use std::sync::Mutex;

use super::FailureInjector;
use crate::domain::ApiError;
use crate::ports::{ReportQuery, ReportRepository};

/// Fake [`ReportRepository`] returning fixed PDF bytes.
pub struct MockReportRepository {
    bytes: Vec<u8>,
    pub failures: FailureInjector,
    queries: Mutex<Vec<ReportQuery>>,
}

impl Default for MockReportRepository {
    fn default() -> Self {
        Self {
            bytes: b"%PDF-1.4 mock report".to_vec(),
            failures: FailureInjector::default(),
            queries: Mutex::new(Vec::new()),
        }
    }
}

impl MockReportRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bytes(mut self, bytes: Vec<u8>) -> Self {
        self.bytes = bytes;
        self
    }

    /// Queries passed to `download` so far.
    pub fn queries(&self) -> Vec<ReportQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportRepository for MockReportRepository {
    async fn download(&self, query: ReportQuery) -> Result<Vec<u8>, ApiError> {
        self.queries.lock().unwrap().push(query);
        self.failures.take()?;
        Ok(self.bytes.clone())
    }
}
