//! Invariant checks for envelope values.
//!
//! The wire types accept any well-formed payload. The checks here decide
//! whether the numbers in it agree with each other.

use envelope_api::types::{PageBase, PaginatedResponse};

use crate::config::{ContractConfig, ValidationPolicy};
use crate::error::EnvelopeError;

/// A pagination invariant broken by a reply.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PagingViolation {
    #[error("page size is 0 but the collection holds {total_count} items and the page {items}")]
    ZeroPageSize { total_count: u64, items: u64 },
    #[error("page size {page_size} exceeds the maximum of {max}")]
    PageSizeTooLarge { page_size: u64, max: u64 },
    #[error("page {page} is below the first page {first}")]
    PageBelowBase { page: u64, first: u64 },
    #[error("{items} items on a page of size {page_size}")]
    TooManyItems { items: u64, page_size: u64 },
    #[error("total count {total_count} is smaller than the {items} items on this page")]
    TotalBelowItems { total_count: u64, items: u64 },
    #[error("total pages is {actual}, expected {expected}")]
    TotalPagesMismatch { actual: u64, expected: u64 },
    #[error("page {page} is past the last page {last} but holds {items} items")]
    PageOutOfRange { page: u64, last: u64, items: u64 },
}

/// Validate a page number against the numbering base.
pub fn validate_page(page: u64, base: PageBase) -> Result<u64, EnvelopeError> {
    if page < base.first() {
        return Err(EnvelopeError::InvalidInput(format!(
            "page must be >= {}",
            base.first()
        )));
    }
    Ok(page)
}

/// Validate page size (must be >= 1 and within the optional maximum).
pub fn validate_page_size(page_size: u64, max: Option<u64>) -> Result<u64, EnvelopeError> {
    if page_size == 0 {
        return Err(EnvelopeError::InvalidInput(
            "page_size must be >= 1".to_string(),
        ));
    }
    if let Some(max) = max {
        if page_size > max {
            return Err(EnvelopeError::InvalidInput(format!(
                "page_size must be between 1 and {}",
                max
            )));
        }
    }
    Ok(page_size)
}

/// Validate an HTTP-style status code (100..=599).
pub fn validate_status(status: u16) -> Result<u16, EnvelopeError> {
    if !(100..=599).contains(&status) {
        return Err(EnvelopeError::InvalidInput(format!(
            "status must be between 100 and 599, got {}",
            status
        )));
    }
    Ok(status)
}

/// Collects every pagination invariant the reply breaks, in a fixed order.
pub fn check_paging<T>(
    page: &PaginatedResponse<T>,
    config: &ContractConfig,
) -> Vec<PagingViolation> {
    let mut violations = Vec::new();
    let items = page.items.len() as u64;
    let base = config.page_base;

    if page.page_size == 0 {
        if page.total_count > 0 || items > 0 {
            violations.push(PagingViolation::ZeroPageSize {
                total_count: page.total_count,
                items,
            });
        }
    } else if items > page.page_size {
        violations.push(PagingViolation::TooManyItems {
            items,
            page_size: page.page_size,
        });
    }

    if let Some(max) = config.max_page_size {
        if page.page_size > max {
            violations.push(PagingViolation::PageSizeTooLarge {
                page_size: page.page_size,
                max,
            });
        }
    }

    if page.page < base.first() {
        violations.push(PagingViolation::PageBelowBase {
            page: page.page,
            first: base.first(),
        });
    }

    if page.total_count < items {
        violations.push(PagingViolation::TotalBelowItems {
            total_count: page.total_count,
            items,
        });
    }

    if page.page_size > 0 {
        let expected = PaginatedResponse::<T>::total_pages_for(page.total_count, page.page_size);
        if page.total_pages != expected {
            violations.push(PagingViolation::TotalPagesMismatch {
                actual: page.total_pages,
                expected,
            });
        }
    }

    if let (Some(index), Some(last)) = (base.to_index(page.page), page.last_page(base)) {
        if index >= page.total_pages && items > 0 {
            violations.push(PagingViolation::PageOutOfRange {
                page: page.page,
                last,
                items,
            });
        }
    }

    violations
}

/// Applies the configured policy to the violations of a reply.
///
/// `Strict` fails with the first violation. `Lenient` logs each one and
/// accepts the reply.
pub fn enforce_paging<T>(
    page: &PaginatedResponse<T>,
    config: &ContractConfig,
) -> Result<(), EnvelopeError> {
    let violations = check_paging(page, config);
    match config.policy {
        ValidationPolicy::Strict => match violations.into_iter().next() {
            Some(first) => {
                tracing::error!("Rejected paginated reply: {}", first);
                Err(EnvelopeError::InvalidPaging(first))
            }
            None => Ok(()),
        },
        ValidationPolicy::Lenient => {
            for violation in &violations {
                tracing::warn!("Accepted paginated reply despite: {}", violation);
            }
            Ok(())
        }
    }
}
