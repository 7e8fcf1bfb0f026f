//! Mock parts catalog repository.

use async_trait::async_trait;
use std::sync::Mutex;
use uuid::Uuid;

use super::FailureInjector;
use crate::domain::{ApiError, Part};
use crate::ports::{NewPart, PartRepository, PartUpdate};

/// Fake [`PartRepository`] over in-memory state.
#[derive(Default)]
pub struct MockPartRepository {
    parts: Mutex<Vec<Part>>,
    pub failures: FailureInjector,
    list_calls: Mutex<usize>,
}

impl MockPartRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parts(self, parts: Vec<Part>) -> Self {
        *self.parts.lock().unwrap() = parts;
        self
    }

    /// Number of `list` calls so far.
    pub fn list_call_count(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }
}

#[async_trait]
impl PartRepository for MockPartRepository {
    async fn list(&self) -> Result<Vec<Part>, ApiError> {
        *self.list_calls.lock().unwrap() += 1;
        self.failures.take()?;
        Ok(self.parts.lock().unwrap().clone())
    }

    async fn get(&self, id: &str) -> Result<Part, ApiError> {
        self.failures.take()?;
        self.parts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ApiError::http(404, "Not found"))
    }

    async fn create(&self, request: NewPart) -> Result<Part, ApiError> {
        self.failures.take()?;
        let part = Part {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            description: request.description,
            category: request.category,
            price_cents: request.price_cents,
            quantity: request.quantity,
            image_url: request.image_url.unwrap_or_default(),
        };
        self.parts.lock().unwrap().push(part.clone());
        Ok(part)
    }

    async fn update(&self, id: &str, update: PartUpdate) -> Result<Part, ApiError> {
        self.failures.take()?;
        let mut parts = self.parts.lock().unwrap();
        let part = parts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ApiError::http(404, "Not found"))?;
        if let Some(name) = update.name {
            part.name = name;
        }
        if let Some(description) = update.description {
            part.description = description;
        }
        if let Some(price_cents) = update.price_cents {
            part.price_cents = price_cents;
        }
        if let Some(quantity) = update.quantity {
            part.quantity = quantity;
        }
        Ok(part.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.failures.take()?;
        let mut parts = self.parts.lock().unwrap();
        let before = parts.len();
        parts.retain(|p| p.id != id);
        if parts.len() == before {
            return Err(ApiError::http(404, "Not found"));
        }
        Ok(())
    }
}
