mod errors;
mod query;
pub mod types;
pub use self::errors::Error;
pub use self::query::{url_for, PageParams, PageQuery, Query, SortOrder};
