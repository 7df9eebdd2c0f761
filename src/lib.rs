//! # Needle API
//!
//! Project tracking REST API: users, projects, role-based memberships,
//! priorities, statuses and stories.
//!
//! ## Architecture
//!
//! - **domain**: Core entities, role model and repository traits
//! - **application**: Services orchestrating the repositories
//! - **infrastructure**: SeaORM database, migrations and crypto
//! - **interfaces**: Axum REST API with Swagger documentation
//! - **shared**: Errors, pagination, search escaping, input validation, shutdown
//! - **server**: Runtime wiring and lifecycle

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig, ConfigError};

// Re-export database types for easy access
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;
pub use infrastructure::{init_database, run_migrations, DatabaseConfig};

// Re-export API router
pub use interfaces::http::{create_api_router, AppState};
pub use server::build_app;
