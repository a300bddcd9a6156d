/*
[INPUT]:  Error sources (HTTP, serialization, config, auth, crypto)
[OUTPUT]: Structured error types for the whole crate
[POS]:    Error handling layer - unified error type
[UPDATE]: When adding new error sources or improving error messages
*/

use thiserror::Error;

/// Main error type for the Afdian adapter
#[derive(Error, Debug)]
pub enum AfdianError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Authentication failed
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Credential encryption failed
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl AfdianError {
    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        matches!(self, AfdianError::Authentication { .. })
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        AfdianError::Authentication {
            message: message.into(),
        }
    }
}

/// Result type alias for Afdian operations
pub type Result<T> = std::result::Result<T, AfdianError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_auth_error() {
        assert!(AfdianError::authentication("no token").is_auth_error());
        assert!(!AfdianError::Config("missing".to_string()).is_auth_error());
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: AfdianError = json_err.into();
        assert!(matches!(err, AfdianError::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization error"));
    }

    #[test]
    fn test_authentication_message() {
        let err = AfdianError::authentication("login response carried no auth_token");
        assert_eq!(
            err.to_string(),
            "Authentication failed: login response carried no auth_token"
        );
    }
}
