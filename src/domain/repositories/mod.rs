//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::label::LabelRepository;
use super::membership::MembershipRepository;
use super::project::ProjectRepository;
use super::story::StoryRepository;
use super::user::UserRepositoryInterface;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let project = repos.projects().get_active(&project_id).await?;
///     let seat = repos.memberships().find_for_user(&project_id, &user_id).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepositoryInterface;
    fn projects(&self) -> &dyn ProjectRepository;
    fn memberships(&self) -> &dyn MembershipRepository;
    fn labels(&self) -> &dyn LabelRepository;
    fn stories(&self) -> &dyn StoryRepository;
}
