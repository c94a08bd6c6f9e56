//! Random code verifier generation
//!
//! Draws raw bytes from the OS CSPRNG and encodes them as unpadded
//! base64url, so the output alphabet is always a subset of the unreserved set.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;
use tracing::debug;

use super::verifier::{validate, CodeVerifier};
use crate::{Error, Result};

/// Entropy used when the caller does not ask for a size
pub const DEFAULT_ENTROPY_BYTES: usize = 64;

/// Smallest entropy size; encodes to 43 characters
pub const MIN_ENTROPY_BYTES: usize = 32;

/// Largest entropy size; encodes to 128 characters
pub const MAX_ENTROPY_BYTES: usize = 96;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntropyError {
    #[error("entropy must be between {min} and {max} bytes, got {requested}")]
    OutOfRange {
        requested: usize,
        min: usize,
        max: usize,
    },
}

/// Check an entropy size without drawing any random bytes.
pub fn check_entropy(entropy_bytes: usize) -> std::result::Result<(), EntropyError> {
    if (MIN_ENTROPY_BYTES..=MAX_ENTROPY_BYTES).contains(&entropy_bytes) {
        Ok(())
    } else {
        Err(EntropyError::OutOfRange {
            requested: entropy_bytes,
            min: MIN_ENTROPY_BYTES,
            max: MAX_ENTROPY_BYTES,
        })
    }
}

/// Length of `n` bytes encoded as unpadded base64url: ceil(n * 8 / 6).
pub const fn encoded_len(n: usize) -> usize {
    (n * 8 + 5) / 6
}

/// Generate a code verifier from the default 64 bytes of entropy.
pub fn generate() -> Result<CodeVerifier> {
    generate_with_entropy(DEFAULT_ENTROPY_BYTES)
}

/// Generate a code verifier from `entropy_bytes` random bytes.
///
/// Fails with [`EntropyError::OutOfRange`] outside [32, 96], and with
/// [`Error::RandomSource`] if the OS random source cannot be read.
pub fn generate_with_entropy(entropy_bytes: usize) -> Result<CodeVerifier> {
    check_entropy(entropy_bytes)?;

    let mut bytes = vec![0u8; entropy_bytes];
    OsRng.try_fill_bytes(&mut bytes).map_err(Error::RandomSource)?;

    let encoded = URL_SAFE_NO_PAD.encode(&bytes);
    debug!(entropy_bytes, length = encoded.len(), "Generated code verifier");

    // Holds for every size in range; a failure here is a bug, not bad input.
    validate(&encoded).map_err(|e| {
        Error::Internal(format!(
            "generated verifier from {} bytes failed validation: {}",
            entropy_bytes, e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pkce::verifier::{MAX_VERIFIER_LENGTH, MIN_VERIFIER_LENGTH};
    use std::collections::HashSet;

    #[test]
    fn test_encoded_len_bounds() {
        assert_eq!(encoded_len(MIN_ENTROPY_BYTES), MIN_VERIFIER_LENGTH);
        assert_eq!(encoded_len(MAX_ENTROPY_BYTES), MAX_VERIFIER_LENGTH);
        assert_eq!(encoded_len(DEFAULT_ENTROPY_BYTES), 86);
    }

    #[test]
    fn test_every_entropy_size_in_range() {
        for n in MIN_ENTROPY_BYTES..=MAX_ENTROPY_BYTES {
            let verifier = generate_with_entropy(n).unwrap();
            assert_eq!(verifier.len(), encoded_len(n), "entropy {}", n);
            assert!(verifier.len() >= MIN_VERIFIER_LENGTH && verifier.len() <= MAX_VERIFIER_LENGTH);
            assert!(validate(verifier.as_str()).is_ok());
        }
    }

    #[test]
    fn test_entropy_out_of_range() {
        for n in [0, 31, 97, 1024] {
            let err = generate_with_entropy(n).unwrap_err();
            assert!(
                matches!(
                    err,
                    Error::Entropy(EntropyError::OutOfRange { requested, min: 32, max: 96 }) if requested == n
                ),
                "unexpected error for {}: {:?}",
                n,
                err
            );
        }
    }

    #[test]
    fn test_default_generation() {
        let verifier = generate().unwrap();
        assert_eq!(verifier.len(), 86);
        for c in verifier.as_str().chars() {
            assert!(
                c.is_ascii_alphanumeric() || c == '-' || c == '_',
                "Invalid base64url character: {}", c
            );
        }
    }

    #[test]
    fn test_verifiers_are_unique() {
        let seen: HashSet<String> = (0..100)
            .map(|_| generate().unwrap().into_inner())
            .collect();
        assert_eq!(seen.len(), 100, "Verifiers should be unique");
    }
}
