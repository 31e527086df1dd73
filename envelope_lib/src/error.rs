//! Error types for the library layer.

use std::fmt;

use crate::validation::PagingViolation;

/// Errors produced by the library layer, wrapping contract errors and
/// adding decoding, invariant and configuration failures.
#[derive(Debug)]
pub enum EnvelopeError {
    /// An error from the contract types.
    Api(envelope_api::Error),
    /// JSON serialization or deserialization failed.
    Serialization(serde_json::Error),
    /// A paginated reply broke a pagination invariant.
    InvalidPaging(PagingViolation),
    /// A value failed validation.
    InvalidInput(String),
    /// The contract configuration could not be read or parsed.
    Config(String),
}

impl fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::InvalidPaging(v) => write!(f, "Invalid paging: {}", v),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::Config(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for EnvelopeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Serialization(e) => Some(e),
            Self::InvalidPaging(v) => Some(v),
            _ => None,
        }
    }
}

impl From<envelope_api::Error> for EnvelopeError {
    fn from(e: envelope_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<serde_json::Error> for EnvelopeError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}

impl From<PagingViolation> for EnvelopeError {
    fn from(v: PagingViolation) -> Self {
        Self::InvalidPaging(v)
    }
}
