//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod label_repository;
pub mod membership_repository;
pub mod project_repository;
pub mod repository_provider;
pub mod story_repository;
pub mod user_repository;

pub use label_repository::SeaOrmLabelRepository;
pub use membership_repository::SeaOrmMembershipRepository;
pub use project_repository::SeaOrmProjectRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use story_repository::SeaOrmStoryRepository;
pub use user_repository::SeaOrmUserRepository;

use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;

fn db_err(e: DbErr) -> DomainError {
    DomainError::Database(e.to_string())
}

fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
