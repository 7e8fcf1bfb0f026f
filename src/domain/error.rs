//! Error types shared by every repository operation.

use thiserror::Error;

/// Fixed message used when a transport failure carries no useful detail.
pub const CONNECTION_ERROR: &str = "Connection error";

/// Failure of a repository operation, normalized for display.
///
/// Repositories never let a transport error escape as a panic or a raw
/// `reqwest` error; every failure path resolves to one of these variants,
/// each of which renders as a user-presentable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The backend answered with a non-success HTTP status.
    /// The message is extracted from the response body when possible,
    /// otherwise a per-operation fallback.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never completed: no connectivity, timeout, or a
    /// malformed response body.
    #[error("{0}")]
    Network(String),
}

impl ApiError {
    /// Creates an HTTP error with an already-extracted message.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        ApiError::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a network error, substituting the generic connection
    /// message when the underlying error text is empty.
    pub fn network(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.is_empty() {
            ApiError::Network(CONNECTION_ERROR.to_string())
        } else {
            ApiError::Network(message)
        }
    }

    /// Creates a network error for a response body that could not be decoded.
    pub fn malformed() -> Self {
        ApiError::Network(CONNECTION_ERROR.to_string())
    }

    /// The user-presentable message for this error.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Http { message, .. } => message,
            ApiError::Network(message) => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_displays_extracted_message() {
        let err = ApiError::http(404, "Vehicle not found");
        assert_eq!(format!("{}", err), "Vehicle not found");
    }

    #[test]
    fn network_error_keeps_underlying_message() {
        let err = ApiError::network("dns error: no such host");
        assert_eq!(err.message(), "dns error: no such host");
    }

    #[test]
    fn network_error_falls_back_when_empty() {
        let err = ApiError::network("");
        assert_eq!(err.message(), CONNECTION_ERROR);
    }

    #[test]
    fn malformed_body_reads_as_connection_error() {
        assert_eq!(ApiError::malformed().message(), CONNECTION_ERROR);
    }
}
