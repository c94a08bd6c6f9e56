//! pkce-s256 - PKCE code verifier and S256 challenge toolkit
//!
//! This library generates RFC 7636 code verifiers, validates user supplied
//! ones against the RFC 3986 unreserved charset, and derives the matching
//! S256 code challenge. The binary wraps it in a small interactive shell.

pub mod config;
pub mod error;
pub mod pkce;
pub mod shell;
pub mod ui;

pub use error::{Error, Result};
pub use pkce::{
    derive, generate, generate_with_entropy, validate, CodeChallenge, CodeVerifier, EntropyError,
    PkcePair, ValidationError,
};
