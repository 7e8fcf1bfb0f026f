//! Parts catalog screen state container.
//!
//! Holds the full catalog plus the derived visible list. Query and category
//! changes recompute the visible list synchronously from the loaded catalog;
//! nothing is refetched for a filter change. Purchases check stock locally
//! before an order is ever placed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use crate::domain::{categories, filter_parts, Order, Part};
use crate::ports::{NewOrder, OrderRepository, PartRepository};

/// Immutable snapshot of the catalog screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogUiState {
    /// Full catalog as loaded.
    pub parts: Vec<Part>,
    /// Catalog after query and category filtering.
    pub visible: Vec<Part>,
    pub categories: Vec<String>,
    pub query: String,
    pub category: Option<String>,
    pub selected_part_id: Option<String>,
    pub is_loading: bool,
    pub is_purchasing: bool,
    pub placed_order: Option<Order>,
    pub error: Option<String>,
}

/// State container for the parts catalog screen.
pub struct CatalogScreen {
    parts: Arc<dyn PartRepository>,
    orders: Arc<dyn OrderRepository>,
    state: watch::Sender<CatalogUiState>,
    load_seq: AtomicU64,
}

impl CatalogScreen {
    pub fn new(parts: Arc<dyn PartRepository>, orders: Arc<dyn OrderRepository>) -> Self {
        let (state, _) = watch::channel(CatalogUiState::default());
        Self {
            parts,
            orders,
            state,
            load_seq: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<CatalogUiState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> CatalogUiState {
        self.state.borrow().clone()
    }

    /// Reloads the catalog; a superseded reload is discarded.
    pub async fn load(&self) {
        let seq = self.load_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
        });

        let result = self.parts.list().await;

        if self.load_seq.load(Ordering::SeqCst) != seq {
            return;
        }

        self.state.send_modify(|s| {
            s.is_loading = false;
            match result {
                Ok(parts) => {
                    s.parts = parts;
                    s.categories = categories(&s.parts);
                    recompute_visible(s);
                }
                Err(e) => s.error = Some(e.message().to_string()),
            }
        });
    }

    pub fn set_query(&self, query: &str) {
        self.state.send_modify(|s| {
            s.query = query.to_string();
            recompute_visible(s);
        });
    }

    /// Selects a category filter, or clears it with `None`.
    pub fn set_category(&self, category: Option<&str>) {
        self.state.send_modify(|s| {
            s.category = category.map(str::to_string);
            recompute_visible(s);
        });
    }

    pub fn select_part(&self, id: &str) {
        self.state.send_modify(|s| {
            s.selected_part_id = Some(id.to_string());
            s.placed_order = None;
            s.error = None;
        });
    }

    /// Places an order for the selected part after a local stock check.
    pub async fn purchase(&self, quantity: u32) {
        let snapshot = self.state();
        let part = match snapshot
            .selected_part_id
            .as_deref()
            .and_then(|id| snapshot.parts.iter().find(|p| p.id == id))
        {
            Some(part) => part.clone(),
            None => {
                self.state
                    .send_modify(|s| s.error = Some("Select a part first".to_string()));
                return;
            }
        };

        if !part.has_stock(quantity) {
            self.state.send_modify(|s| {
                s.error = Some(format!("Insufficient stock: only {} left", part.quantity));
            });
            return;
        }

        self.state.send_modify(|s| {
            s.is_purchasing = true;
            s.error = None;
        });

        match self.orders.create(NewOrder::new(part.id, quantity)).await {
            Ok(order) => self.state.send_modify(|s| {
                s.is_purchasing = false;
                s.placed_order = Some(order);
            }),
            Err(e) => self.state.send_modify(|s| {
                s.is_purchasing = false;
                s.error = Some(e.message().to_string());
            }),
        }
    }
}

fn recompute_visible(state: &mut CatalogUiState) {
    state.visible = filter_parts(&state.parts, &state.query, state.category.as_deref())
        .into_iter()
        .cloned()
        .collect();
}
