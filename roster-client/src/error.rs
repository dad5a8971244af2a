//! Client error types

use serde_json::Value;
use shared::AppError;
use std::collections::HashMap;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failed before a response arrived (DNS, refused, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        code: Option<u16>,
        message: String,
        details: Option<HashMap<String, Value>>,
    },

    /// Client-side validation rejected the payload before sending
    #[error("Validation error: {0}")]
    Validation(AppError),

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status of an API error, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Field-level details, for validation and conflict errors
    pub fn details(&self) -> Option<&HashMap<String, Value>> {
        match self {
            ClientError::Api { details, .. } => details.as_ref(),
            ClientError::Validation(err) => err.details.as_ref(),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_accessors() {
        let err = ClientError::Api {
            status: 409,
            code: Some(8002),
            message: "Email 'a@b.c' is already in use".into(),
            details: None,
        };
        assert_eq!(err.status(), Some(409));
        assert!(err.details().is_none());
        assert!(err.to_string().contains("409"));
    }

    #[test]
    fn test_validation_error_exposes_details() {
        let err = ClientError::Validation(
            AppError::validation("Validation failed").with_detail("email", "Email is required"),
        );
        assert!(err.status().is_none());
        assert!(err.details().unwrap().contains_key("email"));
    }
}
