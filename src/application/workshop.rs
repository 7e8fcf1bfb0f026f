//! Workshop screen state container: service orders and the PDF report.
//!
//! Lifecycle transitions (start, complete, cancel) are gated locally on
//! [`ServiceOrderStatus::can_transition_to`] so obviously invalid intents
//! never leave the device. Completion additionally requires the
//! server-issued token, which only the backend can verify.

use chrono::NaiveDate;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use crate::domain::{ServiceOrder, ServiceOrderStatus};
use crate::ports::{NewServiceOrder, ReportQuery, ReportRepository, ServiceOrderRepository};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Immutable snapshot of the workshop screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkshopUiState {
    pub orders: Vec<ServiceOrder>,
    pub is_loading: bool,
    pub is_submitting: bool,
    pub is_downloading: bool,
    /// Raw PDF bytes of the last downloaded report.
    pub report: Option<Vec<u8>>,
    pub error: Option<String>,
}

/// State container for the workshop screen.
pub struct WorkshopScreen {
    orders: Arc<dyn ServiceOrderRepository>,
    reports: Arc<dyn ReportRepository>,
    state: watch::Sender<WorkshopUiState>,
    load_seq: AtomicU64,
}

impl WorkshopScreen {
    pub fn new(
        orders: Arc<dyn ServiceOrderRepository>,
        reports: Arc<dyn ReportRepository>,
    ) -> Self {
        let (state, _) = watch::channel(WorkshopUiState::default());
        Self {
            orders,
            reports,
            state,
            load_seq: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<WorkshopUiState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> WorkshopUiState {
        self.state.borrow().clone()
    }

    /// Reloads the service orders; a superseded reload is discarded.
    pub async fn load(&self) {
        let seq = self.load_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
        });

        let result = self.orders.list().await;

        if self.load_seq.load(Ordering::SeqCst) != seq {
            return;
        }

        self.state.send_modify(|s| {
            s.is_loading = false;
            match result {
                Ok(orders) => s.orders = orders,
                Err(e) => s.error = Some(e.message().to_string()),
            }
        });
    }

    /// Books a new service order and appends it to the snapshot.
    pub async fn create(&self, request: NewServiceOrder) {
        if request.description.trim().is_empty() {
            self.state
                .send_modify(|s| s.error = Some("Description is required".to_string()));
            return;
        }

        self.state.send_modify(|s| {
            s.is_submitting = true;
            s.error = None;
        });

        match self.orders.create(request).await {
            Ok(order) => self.state.send_modify(|s| {
                s.is_submitting = false;
                s.orders.push(order);
            }),
            Err(e) => self.state.send_modify(|s| {
                s.is_submitting = false;
                s.error = Some(e.message().to_string());
            }),
        }
    }

    /// Moves a pending order to in-progress.
    pub async fn start(&self, id: &str) {
        if !self.can_transition(id, ServiceOrderStatus::InProgress) {
            return;
        }
        let result = self.orders.start(id).await;
        self.apply_transition(id, result);
    }

    /// Completes an in-progress order with the server-issued token.
    pub async fn complete(&self, id: &str, completion_token: &str) {
        if completion_token.trim().is_empty() {
            self.state
                .send_modify(|s| s.error = Some("Completion token is required".to_string()));
            return;
        }
        if !self.can_transition(id, ServiceOrderStatus::Completed) {
            return;
        }
        let result = self.orders.complete(id, completion_token.trim()).await;
        self.apply_transition(id, result);
    }

    /// Cancels a pending or in-progress order.
    pub async fn cancel(&self, id: &str) {
        if !self.can_transition(id, ServiceOrderStatus::Cancelled) {
            return;
        }
        let result = self.orders.cancel(id).await;
        self.apply_transition(id, result);
    }

    /// Downloads the service report for a date range, optionally filtered by
    /// status. Dates are parsed and ordered locally before any request.
    pub async fn download_report(
        &self,
        from: &str,
        to: &str,
        status: Option<ServiceOrderStatus>,
    ) {
        let query = match build_query(from, to, status) {
            Ok(query) => query,
            Err(message) => {
                self.state.send_modify(|s| s.error = Some(message));
                return;
            }
        };

        self.state.send_modify(|s| {
            s.is_downloading = true;
            s.error = None;
        });

        match self.reports.download(query).await {
            Ok(bytes) => self.state.send_modify(|s| {
                s.is_downloading = false;
                s.report = Some(bytes);
            }),
            Err(e) => self.state.send_modify(|s| {
                s.is_downloading = false;
                s.error = Some(e.message().to_string());
            }),
        }
    }

    fn can_transition(&self, id: &str, target: ServiceOrderStatus) -> bool {
        let current = self
            .state
            .borrow()
            .orders
            .iter()
            .find(|o| o.id == id)
            .map(|o| o.status);
        match current {
            Some(status) if status.can_transition_to(&target) => true,
            Some(status) => {
                self.state.send_modify(|s| {
                    s.error = Some(format!("Order is {} and cannot be {}", status, target))
                });
                false
            }
            None => {
                self.state
                    .send_modify(|s| s.error = Some("Not found".to_string()));
                false
            }
        }
    }

    fn apply_transition(&self, id: &str, result: Result<ServiceOrder, crate::domain::ApiError>) {
        match result {
            Ok(updated) => self.state.send_modify(|s| {
                if let Some(order) = s.orders.iter_mut().find(|o| o.id == id) {
                    *order = updated;
                }
                s.error = None;
            }),
            Err(e) => self
                .state
                .send_modify(|s| s.error = Some(e.message().to_string())),
        }
    }
}

fn build_query(
    from: &str,
    to: &str,
    status: Option<ServiceOrderStatus>,
) -> Result<ReportQuery, String> {
    let from = NaiveDate::parse_from_str(from.trim(), DATE_FORMAT)
        .map_err(|_| "Enter a valid date (YYYY-MM-DD)".to_string())?;
    let to = NaiveDate::parse_from_str(to.trim(), DATE_FORMAT)
        .map_err(|_| "Enter a valid date (YYYY-MM-DD)".to_string())?;
    if from > to {
        return Err("Start date must be before end date".to_string());
    }
    let mut query = ReportQuery::new(from, to);
    if let Some(status) = status {
        query = query.with_status(status);
    }
    Ok(query)
}
