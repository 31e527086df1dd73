use serde::{Deserialize, Serialize};

use crate::Error;

/// Envelope for a single-item reply.
///
/// `data` and `status` are required on the wire. `message` and `errors`
/// may be absent or `null` and are omitted when serialized as `None`.
/// `data` is carried even when `errors` is non-empty.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T, status: u16) -> Self {
        Self {
            data,
            status,
            message: None,
            errors: None,
        }
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Appends one error string, creating the list if needed.
    pub fn push_error(&mut self, error: &str) {
        self.errors
            .get_or_insert_with(Vec::new)
            .push(error.to_string());
    }

    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|errors| !errors.is_empty())
    }

    /// Transforms the payload, keeping status, message and errors.
    pub fn map<U, F>(self, f: F) -> ApiResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        ApiResponse {
            data: f(self.data),
            status: self.status,
            message: self.message,
            errors: self.errors,
        }
    }

    /// Unwraps the payload of a clean success reply.
    ///
    /// A non-2xx status or a non-empty `errors` list yields
    /// [`Error::Status`]. The error message is the envelope's `message`,
    /// falling back to the joined `errors`, then to the bare status.
    pub fn into_result(self) -> Result<T, Error> {
        if self.is_success() && !self.has_errors() {
            return Ok(self.data);
        }
        let message = match (self.message, self.errors) {
            (Some(message), _) => message,
            (None, Some(errors)) if !errors.is_empty() => errors.join("; "),
            _ => format!("status {}", self.status),
        };
        Err(Error::Status {
            status: self.status,
            message,
        })
    }
}
