//! Building blocks shared by every HTTP module

pub mod json_body;
pub mod query;
pub mod response;
pub mod views;

pub use json_body::JsonBody;
pub use query::ListQuery;
pub use response::{ApiError, ApiResponse, ApiResult, Empty, ErrorBody, FatalErrorBody};
pub use views::{LabelSummaryView, PageInfo, ProjectRefView, UserSummaryView};
