//! Error types for the envelope contract.

/// Errors raised by the contract types and the query builders.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// A base URL and path did not combine into a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// The backend reported a failure status, or a success status carrying errors.
    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },
}
