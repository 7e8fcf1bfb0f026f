//! Transport layer: the shared HTTP client and error-message extraction.

mod client;
mod error;

pub use client::{ApiClient, ApiResponse, ItemsEnvelope};
pub use error::{ensure_success, extract_error_message, OpErrors};
