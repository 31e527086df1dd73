use url::Url;

use super::params::{PageParams, Query};
use crate::types::{PageBase, PaginatedResponse};

/// Request for one page of a list or search endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub params: PageParams,
    pub search: Option<String>,
    pub sort_by: Option<String>,
}

impl Query for PageQuery {
    fn params_mut(&mut self) -> &mut PageParams {
        &mut self.params
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.params.add_to_url(url);
        if let Some(search) = &self.search {
            url.query_pairs_mut().append_pair("search", search);
        }
        if let Some(sort_by) = &self.sort_by {
            url.query_pairs_mut()
                .append_pair("sortBy", &self.params.order.sort_key(sort_by));
        }
        url
    }
}

impl PageQuery {
    /// Starts a query at the first page of `base`.
    pub fn first(base: PageBase) -> Self {
        Self::default().with_page(base.first())
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    pub fn with_sort_by(mut self, sort_by: &str) -> Self {
        self.sort_by = Some(sort_by.to_string());
        self
    }

    /// The query for the page after `current`, keeping search, sort and
    /// page size. `None` when `current` is the last page.
    pub fn following<T>(&self, current: &PaginatedResponse<T>, base: PageBase) -> Option<Self> {
        let next = current.next_page(base)?;
        let mut query = self.clone().with_page(next);
        if query.params.page_size.is_none() && current.page_size > 0 {
            query.params.page_size = Some(current.page_size);
        }
        Some(query)
    }
}
