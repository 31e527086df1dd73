//! Contract configuration.
//!
//! Settles the details the wire types leave open: the page numbering base,
//! an optional page size ceiling, and whether invariant violations reject
//! a reply or are only logged.
//!
//! ```toml
//! page_base = "zero"
//! max_page_size = 100
//! policy = "lenient"
//! ```

use std::path::Path;

use envelope_api::types::PageBase;
use serde::{Deserialize, Serialize};

use crate::error::EnvelopeError;

/// What happens when a paginated reply breaks an invariant.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Reject the reply with the first violation found.
    #[default]
    Strict,
    /// Log each violation and accept the reply.
    Lenient,
}

/// Settings applied at the decoding boundary.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ContractConfig {
    pub page_base: PageBase,
    pub max_page_size: Option<u64>,
    pub policy: ValidationPolicy,
}

impl ContractConfig {
    /// Parses a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, EnvelopeError> {
        toml::from_str(content).map_err(|e| EnvelopeError::Config(e.to_string()))
    }

    /// Reads and parses a TOML file.
    pub fn from_path(path: &Path) -> Result<Self, EnvelopeError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| EnvelopeError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), ?config, "Loaded contract config");
        Ok(config)
    }

    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_page_base(mut self, page_base: PageBase) -> Self {
        self.page_base = page_base;
        self
    }

    pub fn with_max_page_size(mut self, max_page_size: u64) -> Self {
        self.max_page_size = Some(max_page_size);
        self
    }
}
