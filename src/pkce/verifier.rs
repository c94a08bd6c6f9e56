//! Code verifier type and validation (RFC 7636 §4.1)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Minimum code verifier length in characters
pub const MIN_VERIFIER_LENGTH: usize = 43;

/// Maximum code verifier length in characters
pub const MAX_VERIFIER_LENGTH: usize = 128;

/// Reasons a string is not a valid code verifier
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("codeVerifier must be >= 43 and <= 128 characters, got {len} (too short)")]
    TooShort { len: usize },

    #[error("codeVerifier must be >= 43 and <= 128 characters, got {len} (too long)")]
    TooLong { len: usize },

    #[error("codeVerifier must only contain [A-Za-z0-9-._~], found {ch:?} at position {position}")]
    InvalidCharset { ch: char, position: usize },
}

/// A string that satisfies the RFC 7636 code verifier constraints.
///
/// Every instance holds 43 to 128 characters from the RFC 3986 unreserved set.
/// There is no way to build one without going through [`validate`].
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CodeVerifier(String);

/// Returns true for the RFC 3986 §2.3 unreserved characters.
#[inline]
pub fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

/// Check `input` against the verifier constraints.
///
/// Length is checked before the charset. The input is kept exactly as given,
/// so surrounding whitespace is rejected rather than trimmed.
pub fn validate(input: &str) -> Result<CodeVerifier, ValidationError> {
    let len = input.chars().count();
    if len < MIN_VERIFIER_LENGTH {
        return Err(ValidationError::TooShort { len });
    }
    if len > MAX_VERIFIER_LENGTH {
        return Err(ValidationError::TooLong { len });
    }

    if let Some((position, ch)) = input.chars().enumerate().find(|(_, c)| !is_unreserved(*c)) {
        return Err(ValidationError::InvalidCharset { ch, position });
    }

    Ok(CodeVerifier(input.to_string()))
}

impl CodeVerifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters. Always within [43, 128].
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed verifier.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// The verifier as ISO-8859-1 bytes, the form RFC 7636 §4.2 hashes.
    ///
    /// The unreserved set is pure ASCII, so every character maps to one byte.
    pub(crate) fn latin1_bytes(&self) -> Vec<u8> {
        self.0
            .chars()
            .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
            .collect()
    }
}

// The verifier is a secret; keep it out of debug output and logs.
impl fmt::Debug for CodeVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CodeVerifier")
            .field(&format_args!("<{} chars>", self.len()))
            .finish()
    }
}

impl fmt::Display for CodeVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CodeVerifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CodeVerifier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s)
    }
}

impl TryFrom<&str> for CodeVerifier {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        validate(value)
    }
}

impl TryFrom<String> for CodeVerifier {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate(&value)?;
        Ok(CodeVerifier(value))
    }
}

impl<'de> Deserialize<'de> for CodeVerifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        CodeVerifier::try_from(raw).map_err(serde::de::Error::custom)
    }
}
