//! Parts catalog entities and in-memory filtering.

use serde::{Deserialize, Serialize};

/// A part available for purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Unit price in cents.
    pub price_cents: u64,
    /// Units currently in stock.
    pub quantity: u32,
    pub image_url: String,
}

impl Part {
    /// Whether a purchase of `requested` units can be satisfied from stock.
    pub fn has_stock(&self, requested: u32) -> bool {
        requested > 0 && requested <= self.quantity
    }
}

/// Filters the loaded catalog by free-text query and optional category.
///
/// Matching is case-insensitive over name and description. Pure and cheap;
/// recomputed on every intent instead of cached (catalog sizes are small).
pub fn filter_parts<'a>(
    parts: &'a [Part],
    query: &str,
    category: Option<&str>,
) -> Vec<&'a Part> {
    let needle = query.trim().to_lowercase();
    parts
        .iter()
        .filter(|p| category.map_or(true, |c| p.category == c))
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Distinct categories present in the loaded catalog, sorted for display.
pub fn categories(parts: &[Part]) -> Vec<String> {
    let mut out: Vec<String> = parts
        .iter()
        .map(|p| p.category.clone())
        .filter(|c| !c.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}
