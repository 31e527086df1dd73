mod params;
pub use self::params::{url_for, PageParams, Query, SortOrder};

mod page;
pub use self::page::PageQuery;
