//! REST adapter for the PDF report endpoint.

use async_trait::async_trait;
use std::sync::Arc;

use crate::adapters::http::{ensure_success, ApiClient, OpErrors};
use crate::domain::ApiError;
use crate::ports::{ReportQuery, ReportRepository};

const DOWNLOAD: OpErrors = OpErrors::new("Could not download the report");

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Production implementation of [`ReportRepository`].
pub struct RestReportRepository {
    api: Arc<ApiClient>,
}

impl RestReportRepository {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ReportRepository for RestReportRepository {
    async fn download(&self, query: ReportQuery) -> Result<Vec<u8>, ApiError> {
        let mut params = vec![
            ("from", query.from.format(DATE_FORMAT).to_string()),
            ("to", query.to.format(DATE_FORMAT).to_string()),
        ];
        if let Some(status) = query.status {
            params.push(("status", status.as_wire().to_string()));
        }

        let response = self
            .api
            .get_query("/reports/service-orders", &params)
            .await?;
        let response = ensure_success(response, &DOWNLOAD)?;
        Ok(response.into_bytes())
    }
}
