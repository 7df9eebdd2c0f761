//! Request correlation IDs

pub mod middleware;

pub use middleware::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
