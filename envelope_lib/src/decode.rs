//! Decoding at the deserialization boundary.
//!
//! Every function takes a raw reply body, parses it into one of the
//! envelope types and applies the checks the types themselves leave out.
//! Parse failures are logged with a truncated copy of the body.

use envelope_api::types::{ApiError, ApiResponse, PaginatedResponse};
use serde::de::DeserializeOwned;

use crate::config::ContractConfig;
use crate::error::EnvelopeError;
use crate::validation::{enforce_paging, validate_status};

const MAX_SNIPPET: usize = 2000;

/// A decoded reply, classified by its HTTP status.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T, D> {
    Success(ApiResponse<T>),
    Failure(ApiError<D>),
}

impl<T, D> Reply<T, D> {
    pub fn is_success(&self) -> bool {
        matches!(self, Reply::Success(_))
    }

    /// The envelope status of either variant.
    pub fn status(&self) -> u16 {
        match self {
            Reply::Success(resp) => resp.status,
            Reply::Failure(err) => err.status,
        }
    }

    /// Converts into a `Result`, keeping the error envelope intact.
    pub fn into_result(self) -> Result<ApiResponse<T>, ApiError<D>> {
        match self {
            Reply::Success(resp) => Ok(resp),
            Reply::Failure(err) => Err(err),
        }
    }
}

fn parse<T: DeserializeOwned>(body: &str, what: &str) -> Result<T, EnvelopeError> {
    serde_json::from_str::<T>(body).map_err(|e| {
        tracing::error!("Failed to parse {}: {} | body: {}", what, e, truncate_body(body));
        EnvelopeError::Serialization(e)
    })
}

/// Decodes a single-item success envelope.
pub fn decode_response<T>(body: &str) -> Result<ApiResponse<T>, EnvelopeError>
where
    T: DeserializeOwned,
{
    let resp: ApiResponse<T> = parse(body, "response envelope")?;
    validate_status(resp.status)?;
    if resp.has_errors() {
        tracing::debug!(
            status = resp.status,
            errors = resp.errors.as_ref().map_or(0, Vec::len),
            "Response envelope carries errors"
        );
    }
    Ok(resp)
}

/// Decodes a paginated envelope and enforces the pagination invariants
/// according to `config`.
pub fn decode_page<T>(
    body: &str,
    config: &ContractConfig,
) -> Result<PaginatedResponse<T>, EnvelopeError>
where
    T: DeserializeOwned,
{
    let page: PaginatedResponse<T> = parse(body, "paginated envelope")?;
    enforce_paging(&page, config)?;
    Ok(page)
}

/// Decodes an error envelope with diagnostics of shape `D`.
pub fn decode_error<D>(body: &str) -> Result<ApiError<D>, EnvelopeError>
where
    D: DeserializeOwned,
{
    let err: ApiError<D> = parse(body, "error envelope")?;
    validate_status(err.status)?;
    Ok(err)
}

/// Decodes a reply body according to the HTTP status it arrived with.
///
/// A 2xx status must carry a response envelope. Any other status is read
/// as an error envelope; when the body is not one, an error envelope is
/// synthesized from the HTTP status and a snippet of the body. Envelope
/// statuses are range checked; one that differs from the HTTP status is
/// kept and logged.
pub fn decode_reply<T, D>(http_status: u16, body: &str) -> Result<Reply<T, D>, EnvelopeError>
where
    T: DeserializeOwned,
    D: DeserializeOwned,
{
    validate_status(http_status)?;

    if (200..=299).contains(&http_status) {
        let resp = decode_response::<T>(body)?;
        if resp.status != http_status {
            tracing::warn!(
                "Envelope status {} differs from HTTP status {}",
                resp.status,
                http_status
            );
        }
        return Ok(Reply::Success(resp));
    }

    match serde_json::from_str::<ApiError<D>>(body) {
        Ok(err) => {
            validate_status(err.status)?;
            if err.status != http_status {
                tracing::warn!(
                    "Error envelope status {} differs from HTTP status {}",
                    err.status,
                    http_status
                );
            }
            Ok(Reply::Failure(err))
        }
        Err(e) => {
            let snippet = truncate_body(body);
            tracing::warn!(
                "Reply with status {} is not an error envelope ({}): {}",
                http_status,
                e,
                snippet
            );
            Ok(Reply::Failure(ApiError::new(http_status, &snippet)))
        }
    }
}

/// Cuts a body down to a loggable snippet, on a character boundary.
pub fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_SNIPPET {
        return body.to_string();
    }
    let mut end = MAX_SNIPPET;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
