use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Envelope describing a failed call.
///
/// `data` carries backend-specific diagnostics. Its shape is chosen by the
/// caller through `D`; a missing or `null` `data` is valid.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiError<D> {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<D>,
}

/// Error envelope whose diagnostics are kept as unparsed JSON.
pub type RawApiError = ApiError<serde_json::Value>;

impl<D> ApiError<D> {
    pub fn new(status: u16, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: D) -> Self {
        self.data = Some(data);
        self
    }

    /// True for 4xx statuses.
    pub fn is_client_error(&self) -> bool {
        (400..=499).contains(&self.status)
    }

    /// True for 5xx statuses.
    pub fn is_server_error(&self) -> bool {
        (500..=599).contains(&self.status)
    }

    /// Converts the diagnostics payload, keeping status and message.
    pub fn map_data<E, F>(self, f: F) -> ApiError<E>
    where
        F: FnOnce(D) -> E,
    {
        ApiError {
            status: self.status,
            message: self.message,
            data: self.data.map(f),
        }
    }
}

impl<D> fmt::Display for ApiError<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.status)
    }
}

impl<D: fmt::Debug> std::error::Error for ApiError<D> {}

impl<D> From<ApiError<D>> for Error {
    fn from(e: ApiError<D>) -> Self {
        Error::Status {
            status: e.status,
            message: e.message,
        }
    }
}
