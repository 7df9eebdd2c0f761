use async_trait::async_trait;

use super::{CreateUserDto, User};
use crate::domain::DomainResult;
use crate::shared::{PageRequest, PaginatedResult};

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;

    /// Active users only, oldest first, optionally filtered by username prefix.
    async fn list_active(
        &self,
        filter: Option<&str>,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<User>>;

    /// Case-insensitive lookup among active users.
    async fn get_active_by_username(&self, username: &str) -> DomainResult<Option<User>>;
    async fn get_active_by_id(&self, id: &str) -> DomainResult<Option<User>>;

    async fn update_password(&self, id: &str, password_hash: &str) -> DomainResult<User>;

    /// Soft delete. With `purge_memberships` the user's memberships are
    /// removed in the same transaction.
    async fn deactivate(&self, id: &str, purge_memberships: bool) -> DomainResult<User>;

    /// Active user count, used by startup bootstrap.
    async fn count_active(&self) -> DomainResult<u64>;
}
