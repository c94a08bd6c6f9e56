//! Runtime settings
//!
//! There is no settings file. Values come from command line flags, which
//! fall back to environment variables (see `main.rs`).

use crate::error::Error;
use crate::pkce::{check_entropy, DEFAULT_ENTROPY_BYTES};
use crate::Result;

/// Environment variable holding the default entropy size
pub const ENTROPY_ENV: &str = "PKCE_ENTROPY_BYTES";

/// Settings shared by the shell and the one-shot commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Random bytes drawn per generated verifier
    pub entropy_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            entropy_bytes: DEFAULT_ENTROPY_BYTES,
        }
    }
}

impl Settings {
    pub fn new(entropy_bytes: usize) -> Result<Self> {
        let settings = Self { entropy_bytes };
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the generator would refuse later
    pub fn validate(&self) -> Result<()> {
        check_entropy(self.entropy_bytes)
            .map_err(|e| Error::Config(format!("{} (set via --entropy or {})", e, ENTROPY_ENV)))
    }
}

/// Turn colored output off for the whole process. `NO_COLOR` is honored
/// by `colored` on its own.
pub fn apply_color(color: bool) {
    if !color {
        colored::control::set_override(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.entropy_bytes, 64);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_entropy_range_is_checked() {
        assert!(Settings::new(32).is_ok());
        assert!(Settings::new(96).is_ok());

        let err = Settings::new(16).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains(ENTROPY_ENV));
    }
}
