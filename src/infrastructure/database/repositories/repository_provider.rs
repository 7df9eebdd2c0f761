//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::label::LabelRepository;
use crate::domain::membership::MembershipRepository;
use crate::domain::project::ProjectRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::story::StoryRepository;
use crate::domain::user::UserRepositoryInterface;

use super::label_repository::SeaOrmLabelRepository;
use super::membership_repository::SeaOrmMembershipRepository;
use super::project_repository::SeaOrmProjectRepository;
use super::story_repository::SeaOrmStoryRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let project = repos.projects().get_active(&project_id).await?;
/// let names = repos.memberships().member_names(&project_id).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    projects: SeaOrmProjectRepository,
    memberships: SeaOrmMembershipRepository,
    labels: SeaOrmLabelRepository,
    stories: SeaOrmStoryRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            projects: SeaOrmProjectRepository::new(db.clone()),
            memberships: SeaOrmMembershipRepository::new(db.clone()),
            labels: SeaOrmLabelRepository::new(db.clone()),
            stories: SeaOrmStoryRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepositoryInterface {
        &self.users
    }

    fn projects(&self) -> &dyn ProjectRepository {
        &self.projects
    }

    fn memberships(&self) -> &dyn MembershipRepository {
        &self.memberships
    }

    fn labels(&self) -> &dyn LabelRepository {
        &self.labels
    }

    fn stories(&self) -> &dyn StoryRepository {
        &self.stories
    }
}
