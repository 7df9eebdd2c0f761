//! HTTP REST API interfaces
//!
//! - `common`: response envelope, error mapping, body and query extractors
//! - `middleware`: session token authentication
//! - `modules`: handlers and DTOs per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;

pub use router::{create_api_router, ApiDoc};
pub use state::AppState;
