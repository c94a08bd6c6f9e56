//! Error types for pkce-s256

use thiserror::Error;

use crate::pkce::{EntropyError, ValidationError};

/// Result type alias for pkce-s256 operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating or checking PKCE values
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid code verifier: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid entropy size: {0}")]
    Entropy(#[from] EntropyError),

    /// The OS random source could not be read. Not retried.
    #[error("Secure random source unavailable: {0}")]
    RandomSource(#[source] rand::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_converts() {
        let err: Error = ValidationError::TooShort { len: 3 }.into();
        assert!(matches!(err, Error::Validation(ValidationError::TooShort { len: 3 })));
        assert!(err.to_string().starts_with("Invalid code verifier"));
    }

    #[test]
    fn test_entropy_error_message() {
        let err: Error = crate::pkce::check_entropy(100).unwrap_err().into();
        assert_eq!(
            err.to_string(),
            "Invalid entropy size: entropy must be between 32 and 96 bytes, got 100"
        );
    }
}
