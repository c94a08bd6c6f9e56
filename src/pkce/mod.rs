//! PKCE (Proof Key for Code Exchange) utilities for OAuth2
//!
//! Implements the S256 half of RFC 7636:
//! - code verifier validation against the RFC 3986 unreserved charset
//! - random code verifier generation
//! - S256 code challenge derivation

mod challenge;
mod generator;
mod verifier;

use serde::Serialize;

pub use challenge::{derive, CodeChallenge, METHOD_S256};
pub use generator::{
    check_entropy, encoded_len, generate, generate_with_entropy, EntropyError,
    DEFAULT_ENTROPY_BYTES, MAX_ENTROPY_BYTES, MIN_ENTROPY_BYTES,
};
pub use verifier::{
    is_unreserved, validate, CodeVerifier, ValidationError, MAX_VERIFIER_LENGTH,
    MIN_VERIFIER_LENGTH,
};

use crate::Result;

/// PKCE pair containing both verifier and challenge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PkcePair {
    #[serde(rename = "code_verifier")]
    pub verifier: CodeVerifier,
    #[serde(rename = "code_challenge")]
    pub challenge: CodeChallenge,
    #[serde(rename = "code_challenge_method")]
    pub method: &'static str,
}

impl PkcePair {
    /// Generate a new PKCE pair from the default entropy
    pub fn generate() -> Result<Self> {
        Self::generate_with_entropy(DEFAULT_ENTROPY_BYTES)
    }

    pub fn generate_with_entropy(entropy_bytes: usize) -> Result<Self> {
        let verifier = generate_with_entropy(entropy_bytes)?;
        Ok(Self::from_verifier(verifier))
    }

    /// Build a pair around a verifier supplied by the caller
    pub fn from_verifier(verifier: CodeVerifier) -> Self {
        let challenge = derive(&verifier);
        Self {
            verifier,
            challenge,
            method: METHOD_S256,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pkce_pair() {
        let pair = PkcePair::generate().unwrap();
        assert_eq!(pair.verifier.len(), 86);
        assert_eq!(pair.method, "S256");

        // Verify challenge matches verifier
        let expected_challenge = derive(&pair.verifier);
        assert_eq!(pair.challenge, expected_challenge);
    }

    #[test]
    fn test_pair_with_custom_entropy() {
        let pair = PkcePair::generate_with_entropy(MIN_ENTROPY_BYTES).unwrap();
        assert_eq!(pair.verifier.len(), MIN_VERIFIER_LENGTH);
        assert!(PkcePair::generate_with_entropy(MAX_ENTROPY_BYTES + 1).is_err());
    }

    #[test]
    fn test_pair_json_shape() {
        let verifier = validate("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk").unwrap();
        let pair = PkcePair::from_verifier(verifier);
        let json = serde_json::to_value(&pair).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "code_verifier": "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk",
                "code_challenge": "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM",
                "code_challenge_method": "S256",
            })
        );
    }
}
