//! S256 code challenge derivation (RFC 7636 §4.2)

use std::fmt;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use super::verifier::CodeVerifier;

/// The only challenge method supported
pub const METHOD_S256: &str = "S256";

/// Output of the S256 transform. Opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CodeChallenge(String);

/// Derive the S256 challenge for a verifier.
///
/// code_challenge = BASE64URL-ENCODE(SHA256(ASCII(code_verifier)))
pub fn derive(verifier: &CodeVerifier) -> CodeChallenge {
    let hash = Sha256::digest(verifier.latin1_bytes());
    let challenge = URL_SAFE_NO_PAD.encode(hash);
    debug!(verifier_len = verifier.len(), "Derived S256 code challenge");
    CodeChallenge(challenge)
}

impl CodeChallenge {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn method(&self) -> &'static str {
        METHOD_S256
    }

    /// Whether this challenge is the S256 transform of `verifier`.
    pub fn is_derived_from(&self, verifier: &CodeVerifier) -> bool {
        derive(verifier) == *self
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CodeChallenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wrap a challenge received from elsewhere, e.g. for [`CodeChallenge::is_derived_from`].
impl From<String> for CodeChallenge {
    fn from(value: String) -> Self {
        CodeChallenge(value)
    }
}

impl AsRef<str> for CodeChallenge {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pkce::{generate, validate};

    #[test]
    fn test_rfc7636_appendix_b_vector() {
        let verifier = validate("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk").unwrap();
        let challenge = derive(&verifier);
        assert_eq!(challenge.as_str(), "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
    }

    #[test]
    fn test_derive_is_deterministic() {
        let verifier = generate().unwrap();
        assert_eq!(derive(&verifier), derive(&verifier));
    }

    #[test]
    fn test_code_challenge_format() {
        let verifier = generate().unwrap();
        let challenge = derive(&verifier);

        // SHA256 produces 32 bytes, Base64URL encoding produces 43 characters (no padding)
        assert_eq!(challenge.as_str().len(), 43);
        for c in challenge.as_str().chars() {
            assert!(
                c.is_ascii_alphanumeric() || c == '-' || c == '_',
                "Invalid Base64URL character: {}", c
            );
        }
    }

    #[test]
    fn test_is_derived_from() {
        let verifier = validate("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk").unwrap();
        let other = validate(&"a".repeat(43)).unwrap();
        let challenge = derive(&verifier);
        assert!(challenge.is_derived_from(&verifier));
        assert!(!challenge.is_derived_from(&other));
        let received = CodeChallenge::from("E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM".to_string());
        assert!(received.is_derived_from(&verifier));
        assert_eq!(challenge.method(), "S256");
    }
}
