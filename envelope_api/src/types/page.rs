use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Numbering base of the `page` field.
///
/// The backend contract decides whether the first page is `0` or `1`, so
/// every page computation takes the base explicitly. Defaults to `One`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PageBase {
    /// First page is `0`.
    Zero,
    /// First page is `1`.
    #[default]
    One,
}

impl PageBase {
    /// The number of the first page in this base.
    pub fn first(self) -> u64 {
        match self {
            PageBase::Zero => 0,
            PageBase::One => 1,
        }
    }

    /// Converts a page number to a 0-based index. `None` when the page is
    /// below the first page.
    pub fn to_index(self, page: u64) -> Option<u64> {
        page.checked_sub(self.first())
    }

    /// Converts a 0-based index back to a page number in this base.
    pub fn from_index(self, index: u64) -> u64 {
        index.saturating_add(self.first())
    }
}

impl FromStr for PageBase {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" | "zero" => Ok(PageBase::Zero),
            "1" | "one" => Ok(PageBase::One),
            _ => Err(()),
        }
    }
}

/// One page of an ordered collection plus its pagination metadata.
///
/// Counts are unsigned, so a payload carrying a negative count fails to
/// deserialize. The remaining invariants (`items.len() <= page_size`,
/// `total_pages == ceil(total_count / page_size)`) are checked at the
/// decoding boundary, not here.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

/// `ceil(total_count / page_size)`, or `0` when `page_size` is `0`.
pub fn total_pages_for(total_count: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        0
    } else {
        total_count.div_ceil(page_size)
    }
}

impl<T> PaginatedResponse<T> {
    /// Expected page count for the given totals.
    pub fn total_pages_for(total_count: u64, page_size: u64) -> u64 {
        total_pages_for(total_count, page_size)
    }

    /// Cuts one page out of a complete ordered collection.
    ///
    /// A page below `base` or past the last page yields no items; the
    /// metadata still describes the whole collection.
    pub fn from_items(all: &[T], page: u64, page_size: u64, base: PageBase) -> Self
    where
        T: Clone,
    {
        let total_count = all.len() as u64;
        let items = match base.to_index(page) {
            Some(index) if page_size > 0 => {
                let start = index.saturating_mul(page_size).min(total_count) as usize;
                let take = page_size.min(total_count) as usize;
                all.iter().skip(start).take(take).cloned().collect()
            }
            _ => Vec::new(),
        };
        Self {
            items,
            total_count,
            page,
            page_size,
            total_pages: total_pages_for(total_count, page_size),
        }
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Position of this page's first item within the whole collection.
    pub fn offset(&self, base: PageBase) -> Option<u64> {
        base.to_index(self.page)?.checked_mul(self.page_size)
    }

    /// Number of the last page, `None` for an empty collection.
    pub fn last_page(&self, base: PageBase) -> Option<u64> {
        self.total_pages
            .checked_sub(1)
            .map(|index| base.from_index(index))
    }

    pub fn has_next_page(&self, base: PageBase) -> bool {
        base.to_index(self.page)
            .is_some_and(|index| index.saturating_add(1) < self.total_pages)
    }

    pub fn has_previous_page(&self, base: PageBase) -> bool {
        base.to_index(self.page).is_some_and(|index| index > 0)
    }

    pub fn next_page(&self, base: PageBase) -> Option<u64> {
        self.has_next_page(base).then(|| self.page + 1)
    }

    pub fn previous_page(&self, base: PageBase) -> Option<u64> {
        self.has_previous_page(base).then(|| self.page - 1)
    }

    /// Transforms every item, keeping order and metadata.
    pub fn map<U, F>(self, f: F) -> PaginatedResponse<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedResponse {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}
