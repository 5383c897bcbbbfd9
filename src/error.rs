//! Error types for the Eversign SDK.
//!
//! This module provides a unified error type for all SDK operations. Local
//! precondition failures, webservice error envelopes and undecodable
//! responses all surface through [`EversignError`].

use thiserror::Error;

/// Result type for Eversign operations.
pub type Result<T> = std::result::Result<T, EversignError>;

/// Error code the API reserves for responses that could not be parsed.
pub const PARSE_ERROR_CODE: i64 = 999;

/// Errors that can occur when using the Eversign SDK.
#[derive(Error, Debug)]
pub enum EversignError {
    /// A local precondition was violated before any request was sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Webservice error reported in the response envelope.
    #[error("Webservice Error No {code} - Type: {kind}")]
    Api {
        /// Error code from the API.
        code: i64,
        /// Error type from the API (e.g. `invalid_access_key`).
        kind: String,
        /// Optional human-readable detail.
        info: Option<String>,
    },

    /// The response body was not JSON or did not match the expected shape.
    #[error("Webservice Error No 999 - Type: parsing_exception: {0}")]
    Parse(String),

    /// Non-success HTTP status without an error envelope.
    #[error("HTTP status {status_code}: {body}")]
    Status {
        /// HTTP status code.
        status_code: u16,
        /// Raw response body.
        body: String,
    },

    /// OAuth token exchange failed.
    #[error("Could not generate token: {0}")]
    OAuth(String),

    /// The requested business is not available to the credential.
    #[error("No Business found with the specified Business Id {0}")]
    BusinessNotFound(i64),

    /// A business-scoped call was made without a selected business.
    #[error("No Business selected")]
    NoBusinessSelected,

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Local file error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EversignError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        EversignError::InvalidRequest(message.into())
    }

    /// Returns the webservice error code if available.
    pub fn code(&self) -> Option<i64> {
        match self {
            EversignError::Api { code, .. } => Some(*code),
            EversignError::Parse(_) => Some(PARSE_ERROR_CODE),
            _ => None,
        }
    }

    /// Returns true if the server answered with an error envelope.
    pub fn is_api_error(&self) -> bool {
        matches!(self, EversignError::Api { .. })
    }

    /// Returns true if the error was raised locally, before any network call.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            EversignError::InvalidRequest(_)
                | EversignError::BusinessNotFound(_)
                | EversignError::NoBusinessSelected
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EversignError::Api {
            code: 102,
            kind: "invalid_access_key".to_string(),
            info: None,
        };
        assert_eq!(
            err.to_string(),
            "Webservice Error No 102 - Type: invalid_access_key"
        );

        let parse = EversignError::Parse("<html>".to_string());
        assert_eq!(
            parse.to_string(),
            "Webservice Error No 999 - Type: parsing_exception: <html>"
        );
    }

    #[test]
    fn test_code() {
        let err = EversignError::Api {
            code: 404,
            kind: "document_not_found".to_string(),
            info: Some("No document".to_string()),
        };
        assert_eq!(err.code(), Some(404));
        assert!(err.is_api_error());

        assert_eq!(EversignError::Parse(String::new()).code(), Some(999));
        assert_eq!(EversignError::NoBusinessSelected.code(), None);
    }

    #[test]
    fn test_is_local() {
        assert!(EversignError::invalid("missing hash").is_local());
        assert!(EversignError::BusinessNotFound(7).is_local());
        assert!(!EversignError::Parse("x".to_string()).is_local());
    }
}
