//! Order history screen state container.
//!
//! Cancellation is gated locally on the order status so a doomed request
//! never leaves the device; the backend remains the final authority and its
//! rejection message is surfaced verbatim if the local gate is out of date.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use crate::domain::Order;
use crate::ports::OrderRepository;

/// Immutable snapshot of the order history screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrdersUiState {
    pub orders: Vec<Order>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// State container for the order history screen.
pub struct OrdersScreen {
    orders: Arc<dyn OrderRepository>,
    state: watch::Sender<OrdersUiState>,
    load_seq: AtomicU64,
}

impl OrdersScreen {
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        let (state, _) = watch::channel(OrdersUiState::default());
        Self {
            orders,
            state,
            load_seq: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<OrdersUiState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> OrdersUiState {
        self.state.borrow().clone()
    }

    /// Reloads the order history; a superseded reload is discarded.
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

    /// Cancels an order, replacing it in the snapshot with the backend's
    /// updated copy.
    pub async fn cancel(&self, id: &str) {
        let cancellable = self
            .state
            .borrow()
            .orders
            .iter()
            .find(|o| o.id == id)
            .map(|o| o.status.is_cancellable());
        match cancellable {
            Some(true) => {}
            Some(false) => {
                self.state.send_modify(|s| {
                    s.error = Some("Order can no longer be cancelled".to_string())
                });
                return;
            }
            None => {
                self.state
                    .send_modify(|s| s.error = Some("Not found".to_string()));
                return;
            }
        }

        match self.orders.cancel(id).await {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockOrderRepository;
    use crate::domain::{ApiError, OrderStatus};
    use chrono::Utc;

    fn order(id: &str, status: OrderStatus) -> Order {
        Order {
            id: id.to_string(),
            user_id: "u1".to_string(),
            part_id: "p1".to_string(),
            quantity: 1,
            total_cents: 1999,
            status,
            created_at: Some(Utc::now()),
        }
    }

    async fn loaded_screen(orders: Vec<Order>) -> (OrdersScreen, Arc<MockOrderRepository>) {
        let repo = Arc::new(MockOrderRepository::new().with_orders(orders));
        let screen = OrdersScreen::new(repo.clone());
        screen.load().await;
        (screen, repo)
    }

    #[tokio::test]
    async fn load_fills_the_history() {
        let (screen, _) = loaded_screen(vec![
            order("o1", OrderStatus::Pending),
            order("o2", OrderStatus::Delivered),
        ])
        .await;

        let state = screen.state();
        assert_eq!(state.orders.len(), 2);
        assert!(!state.is_loading);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn cancelling_a_pending_order_updates_it_in_place() {
        let (screen, _) = loaded_screen(vec![order("o1", OrderStatus::Pending)]).await;
        screen.cancel("o1").await;

        let state = screen.state();
        assert_eq!(state.orders[0].status, OrderStatus::Cancelled);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn shipped_order_is_rejected_locally() {
        let (screen, repo) = loaded_screen(vec![order("o1", OrderStatus::Shipped)]).await;
        // A repository failure here would prove the call went through.
        repo.failures.push(ApiError::network(""));
        screen.cancel("o1").await;

        let state = screen.state();
        assert_eq!(
            state.error.as_deref(),
            Some("Order can no longer be cancelled")
        );
        assert_eq!(state.orders[0].status, OrderStatus::Shipped);
    }

    #[tokio::test]
    async fn backend_rejection_is_surfaced_verbatim() {
        let (screen, repo) = loaded_screen(vec![order("o1", OrderStatus::Pending)]).await;
        repo.failures
            .push(ApiError::http(400, "Order can no longer be cancelled"));
        screen.cancel("o1").await;

        let state = screen.state();
        assert_eq!(
            state.error.as_deref(),
            Some("Order can no longer be cancelled")
        );
        assert_eq!(state.orders[0].status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn load_failure_surfaces_the_message() {
        let repo = Arc::new(MockOrderRepository::new());
        repo.failures.push(ApiError::http(401, "Session expired"));
        let screen = OrdersScreen::new(repo);
        screen.load().await;

        assert_eq!(screen.state().error.as_deref(), Some("Session expired"));
    }
}
