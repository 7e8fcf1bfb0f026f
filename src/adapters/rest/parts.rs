//! REST adapter for the parts catalog endpoints.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::adapters::http::{ensure_success, ApiClient, ItemsEnvelope, OpErrors};
use crate::domain::{ApiError, Part};
use crate::ports::{NewPart, PartRepository, PartUpdate};

const LOAD: OpErrors = OpErrors::new("Could not load parts");
const SAVE: OpErrors = OpErrors::new("Could not save the part");
const DELETE: OpErrors = OpErrors::new("Could not delete the part");

/// Production implementation of [`PartRepository`].
pub struct RestPartRepository {
    api: Arc<ApiClient>,
}

impl RestPartRepository {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PartRepository for RestPartRepository {
    async fn list(&self) -> Result<Vec<Part>, ApiError> {
        let response = ensure_success(self.api.get("/parts").await?, &LOAD)?;
        let envelope: ItemsEnvelope<PartDto> = response.json()?;
        Ok(envelope.items.into_iter().map(PartDto::into_domain).collect())
    }

    async fn get(&self, id: &str) -> Result<Part, ApiError> {
        let path = format!("/parts/{}", id);
        let response = ensure_success(self.api.get(&path).await?, &LOAD)?;
        let envelope: PartEnvelope = response.json()?;
        Ok(envelope.part.into_domain())
    }

    async fn create(&self, request: NewPart) -> Result<Part, ApiError> {
        let body = NewPartDto::from(request);
        let response = ensure_success(self.api.post("/parts", &body).await?, &SAVE)?;
        let envelope: PartEnvelope = response.json()?;
        Ok(envelope.part.into_domain())
    }

    async fn update(&self, id: &str, update: PartUpdate) -> Result<Part, ApiError> {
        let path = format!("/parts/{}", id);
        let body = PartUpdateDto::from(update);
        let response = ensure_success(self.api.patch(&path, &body).await?, &SAVE)?;
        let envelope: PartEnvelope = response.json()?;
        Ok(envelope.part.into_domain())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/parts/{}", id);
        ensure_success(self.api.delete(&path).await?, &DELETE)?;
        Ok(())
    }
}

// ----- Wire Types -----

#[derive(Debug, Deserialize)]
struct PartEnvelope {
    part: PartDto,
}

#[derive(Debug, Default, Deserialize)]
struct PartDto {
    id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    category: Option<String>,
    price_cents: Option<u64>,
    quantity: Option<u32>,
    image_url: Option<String>,
}

impl PartDto {
    fn into_domain(self) -> Part {
        Part {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            price_cents: self.price_cents.unwrap_or_default(),
            quantity: self.quantity.unwrap_or_default(),
            image_url: self.image_url.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct NewPartDto {
    name: String,
    description: String,
    category: String,
    price_cents: u64,
    quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
}

impl From<NewPart> for NewPartDto {
    fn from(request: NewPart) -> Self {
        Self {
            name: request.name,
            description: request.description,
            category: request.category,
            price_cents: request.price_cents,
            quantity: request.quantity,
            image_url: request.image_url,
        }
    }
}

#[derive(Debug, Serialize)]
struct PartUpdateDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price_cents: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quantity: Option<u32>,
}

impl From<PartUpdate> for PartUpdateDto {
    fn from(update: PartUpdate) -> Self {
        Self {
            name: update.name,
            description: update.description,
            price_cents: update.price_cents,
            quantity: update.quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_dto_maps_full_payload_preserving_id() {
        let dto: PartDto = serde_json::from_str(
            r#"{
                "id": "p1", "name": "Oil filter", "description": "OEM",
                "category": "filters", "price_cents": 1999, "quantity": 3,
                "image_url": "https://cdn/p1.png"
            }"#,
        )
        .unwrap();
        let part = dto.into_domain();
        assert_eq!(part.id, "p1");
        assert_eq!(part.price_cents, 1999);
        assert_eq!(part.quantity, 3);
    }

    #[test]
    fn part_dto_substitutes_defaults_for_missing_fields() {
        let dto: PartDto = serde_json::from_str(r#"{"id": "p1"}"#).unwrap();
        let part = dto.into_domain();
        assert_eq!(part.id, "p1");
        assert_eq!(part.name, "");
        assert_eq!(part.quantity, 0);
        assert!(!part.has_stock(1));
    }

    #[test]
    fn update_dto_serializes_only_present_fields() {
        let update = PartUpdate::new().quantity(7);
        let json = serde_json::to_value(PartUpdateDto::from(update)).unwrap();
        assert_eq!(json, serde_json::json!({ "quantity": 7 }));
    }
}
