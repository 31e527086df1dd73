mod response;
pub use self::response::ApiResponse;

mod page;
pub use self::page::{PageBase, PaginatedResponse};

mod error;
pub use self::error::{ApiError, RawApiError};
