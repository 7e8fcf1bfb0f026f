//! Parts catalog repository port.

use async_trait::async_trait;

use crate::domain::{ApiError, Part};

/// Port for the parts catalog endpoints.
#[async_trait]
pub trait PartRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Part>, ApiError>;

    async fn get(&self, id: &str) -> Result<Part, ApiError>;

    async fn create(&self, request: NewPart) -> Result<Part, ApiError>;

    /// Partial update; only fields present in `update` are sent.
    async fn update(&self, id: &str, update: PartUpdate) -> Result<Part, ApiError>;

    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}

/// Payload for adding a part to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPart {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price_cents: u64,
    pub quantity: u32,
    pub image_url: Option<String>,
}

/// Field update set for a PATCH on a part (price and stock adjustments).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<u64>,
    pub quantity: Option<u32>,
}

impl PartUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn price_cents(mut self, price_cents: u64) -> Self {
        self.price_cents = Some(price_cents);
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price_cents.is_none()
            && self.quantity.is_none()
    }
}
