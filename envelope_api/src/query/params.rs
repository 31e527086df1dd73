//! Request-side paging parameters shared by every list query.

use std::cmp::Ordering;
use std::str::FromStr;

use url::Url;

use crate::Error;

/// A request that can be written into a URL query string.
pub trait Query {
    fn add_to_url(&self, url: &Url) -> Url;

    fn params_mut(&mut self) -> &mut PageParams;

    /// Page number, in the base the backend counts from.
    fn with_page(mut self, page: u64) -> Self
    where
        Self: Sized,
    {
        self.params_mut().page = page;
        self
    }

    fn with_page_size(mut self, page_size: u64) -> Self
    where
        Self: Sized,
    {
        self.params_mut().page_size = Some(page_size);
        self
    }

    fn with_order(mut self, order: SortOrder) -> Self
    where
        Self: Sized,
    {
        self.params_mut().order = order;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    /// Orients an ascending comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }

    /// The `sortBy` value for `field`: descending keys carry a `-` prefix.
    pub fn sort_key(self, field: &str) -> String {
        match self {
            SortOrder::Ascending => field.to_string(),
            SortOrder::Descending => format!("-{}", field),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            other => Err(format!("unknown sort order '{}', expected asc or desc", other)),
        }
    }
}

/// `page`, `pageSize` and the sort order of a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageParams {
    pub page: u64,
    /// `None` leaves the page size to the backend.
    pub page_size: Option<u64>,
    pub order: SortOrder,
}

impl Default for PageParams {
    fn default() -> Self {
        PageParams {
            page: 1,
            page_size: None,
            order: SortOrder::default(),
        }
    }
}

impl PageParams {
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &self.page.to_string());
            if let Some(page_size) = self.page_size {
                pairs.append_pair("pageSize", &page_size.to_string());
            }
        }
        url
    }
}

/// Parses `base_url` followed by `path` and writes `query` into it.
pub fn url_for(base_url: &str, path: &str, query: Option<&impl Query>) -> Result<Url, Error> {
    let joined = format!("{}{}", base_url, path);
    let url = Url::parse(&joined).map_err(|e| {
        tracing::error!("Invalid URL {}: {}", joined, e);
        Error::InvalidUrl(format!("{}: {}", joined, e))
    })?;
    Ok(match query {
        Some(query) => query.add_to_url(&url),
        None => url,
    })
}
