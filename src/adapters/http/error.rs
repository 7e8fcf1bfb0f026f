//! Error-message extraction for non-success HTTP responses.
//!
//! Every repository operation funnels failures through [`ensure_success`]:
//! a structured message is pulled out of the body when the backend sent
//! one, otherwise a per-operation fallback applies, with status-specific
//! overrides for the handful of codes users actually hit.

use super::client::ApiResponse;
use crate::domain::ApiError;

/// Fallback messages for one repository operation.
///
/// `overrides` are checked before the crate-wide status fallbacks, so an
/// operation can give 401 a more precise meaning (login: bad credentials
/// rather than an expired session).
#[derive(Debug, Clone, Copy)]
pub struct OpErrors {
    pub default: &'static str,
    pub overrides: &'static [(u16, &'static str)],
}

impl OpErrors {
    pub const fn new(default: &'static str) -> Self {
        Self {
            default,
            overrides: &[],
        }
    }

    pub const fn with_overrides(
        default: &'static str,
        overrides: &'static [(u16, &'static str)],
    ) -> Self {
        Self { default, overrides }
    }
}

/// Crate-wide status fallbacks, applied when the operation has no override.
const STATUS_FALLBACKS: &[(u16, &'static str)] = &[
    (400, "Invalid data"),
    (401, "Session expired"),
    (404, "Not found"),
];

/// Extracts a display message for a non-success response.
///
/// Tries, in order: a `{"error": "<msg>"}` field, an `{"errors": [...]}`
/// array joined by newlines, the operation's status overrides, the
/// crate-wide status fallbacks, and finally the operation default.
pub fn extract_error_message(status: u16, body: &[u8], op: &OpErrors) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        if let Some(msg) = value.get("error").and_then(|e| e.as_str()) {
            if !msg.is_empty() {
                return msg.to_string();
            }
        }
        if let Some(list) = value.get("errors").and_then(|e| e.as_array()) {
            let messages: Vec<&str> = list.iter().filter_map(|v| v.as_str()).collect();
            if !messages.is_empty() {
                return messages.join("\n");
            }
        }
    }

    lookup(op.overrides, status)
        .or_else(|| lookup(STATUS_FALLBACKS, status))
        .unwrap_or(op.default)
        .to_string()
}

fn lookup(table: &[(u16, &'static str)], status: u16) -> Option<&'static str> {
    table
        .iter()
        .find(|(code, _)| *code == status)
        .map(|(_, msg)| *msg)
}

/// Passes a successful response through, or maps a non-2xx one to
/// [`ApiError::Http`] with an extracted message.
pub fn ensure_success(response: ApiResponse, op: &OpErrors) -> Result<ApiResponse, ApiError> {
    if response.status.is_success() {
        return Ok(response);
    }
    let status = response.status.as_u16();
    let message = extract_error_message(status, &response.body, op);
    tracing::warn!(status, %message, "api request failed");
    Err(ApiError::http(status, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const OP: OpErrors = OpErrors::new("Could not load vehicles");
    const LOGIN: OpErrors =
        OpErrors::with_overrides("Could not sign in", &[(401, "Invalid credentials")]);

    #[test]
    fn single_error_field_is_extracted_verbatim() {
        let body = br#"{"error": "X"}"#;
        assert_eq!(extract_error_message(422, body, &OP), "X");
    }

    #[test]
    fn errors_array_is_joined_with_newlines() {
        let body = br#"{"errors": ["A", "B"]}"#;
        assert_eq!(extract_error_message(422, body, &OP), "A\nB");
    }

    #[test]
    fn non_string_error_entries_are_skipped() {
        let body = br#"{"errors": [1, "A", null]}"#;
        assert_eq!(extract_error_message(422, body, &OP), "A");
    }

    #[test]
    fn unparseable_body_uses_status_fallback() {
        assert_eq!(extract_error_message(401, b"<html>", &OP), "Session expired");
        assert_eq!(extract_error_message(404, b"", &OP), "Not found");
        assert_eq!(extract_error_message(400, b"oops", &OP), "Invalid data");
    }

    #[test]
    fn unmapped_status_uses_operation_default() {
        assert_eq!(
            extract_error_message(500, b"", &OP),
            "Could not load vehicles"
        );
    }

    #[test]
    fn operation_override_beats_status_fallback() {
        assert_eq!(
            extract_error_message(401, b"", &LOGIN),
            "Invalid credentials"
        );
        // Other statuses still use the shared fallbacks.
        assert_eq!(extract_error_message(404, b"", &LOGIN), "Not found");
    }

    #[test]
    fn structured_body_beats_every_fallback() {
        let body = br#"{"error": "Account locked"}"#;
        assert_eq!(extract_error_message(401, body, &LOGIN), "Account locked");
    }

    proptest! {
        #[test]
        fn extraction_never_panics_and_never_returns_empty(
            status in 400u16..600,
            body in proptest::collection::vec(any::<u8>(), 0..256),
        ) {
            let message = extract_error_message(status, &body, &OP);
            prop_assert!(!message.is_empty());
        }

        #[test]
        fn string_error_field_is_always_verbatim(msg in "[a-zA-Z0-9 ]{1,40}") {
            let body = serde_json::json!({ "error": msg }).to_string();
            prop_assert_eq!(extract_error_message(422, body.as_bytes(), &OP), msg);
        }
    }
}
