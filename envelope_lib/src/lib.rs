//! Library layer for the envelope contract: decoding, validation and configuration.
//!
//! Wraps the `envelope_api` wire types with a deserialization boundary that
//! checks the pagination invariants according to a [`ContractConfig`].

pub mod config;
pub mod decode;
pub mod error;
pub mod validation;

pub use envelope_api;
pub use envelope_api::types;
pub use envelope_api::{url_for, PageQuery, Query, SortOrder};

pub use config::{ContractConfig, ValidationPolicy};
pub use decode::{decode_error, decode_page, decode_reply, decode_response, Reply};
pub use error::EnvelopeError;
pub use validation::PagingViolation;
