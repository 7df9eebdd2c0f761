//! User management service

use std::sync::Arc;

use tracing::info;

use crate::config::{AdminConfig, UserRemovalPolicy};
use crate::domain::user::CreateUserDto;
use crate::domain::{DomainError, DomainResult, RepositoryProvider, User};
use crate::infrastructure::crypto::api_key::generate_api_key;
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::shared::errors::InfraError;
use crate::shared::validations::rules::{check_password, check_username};
use crate::shared::{PageRequest, PaginatedResult};

/// Validated signup input
#[derive(Debug, Clone)]
pub struct NewUser {
    /// As typed; stored lowercase, kept verbatim as the display name
    pub username: String,
    pub password: String,
    pub display_name: Option<String>,
}

pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
    bcrypt_cost: u32,
    removal_policy: UserRemovalPolicy,
}

impl UserService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        bcrypt_cost: u32,
        removal_policy: UserRemovalPolicy,
    ) -> Self {
        Self {
            repos,
            bcrypt_cost,
            removal_policy,
        }
    }

    // ── Registration ────────────────────────────────────────────

    pub async fn register(&self, input: NewUser) -> DomainResult<User> {
        if self
            .repos
            .users()
            .get_active_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(DomainError::validation("username is already taken"));
        }

        let password_hash =
            hash_password(&input.password, self.bcrypt_cost).map_err(InfraError::from)?;

        let dto = CreateUserDto {
            username: input.username.to_lowercase(),
            display_name: input.display_name.unwrap_or_else(|| input.username.clone()),
            password_hash,
            api_key: generate_api_key(),
        };

        let user = self.repos.users().create_user(dto).await?;
        info!(user_id = %user.id, username = %user.username, "New user registered");
        Ok(user)
    }

    /// Create the configured bootstrap account unless it already exists.
    pub async fn ensure_admin(&self, admin: &AdminConfig) -> DomainResult<Option<User>> {
        check_username(&admin.username)?;
        check_password(&admin.password)?;

        if self
            .repos
            .users()
            .get_active_by_username(&admin.username)
            .await?
            .is_some()
        {
            return Ok(None);
        }

        let user = self
            .register(NewUser {
                username: admin.username.clone(),
                password: admin.password.clone(),
                display_name: admin.display_name.clone(),
            })
            .await?;
        Ok(Some(user))
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list(
        &self,
        filter: Option<&str>,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<User>> {
        self.repos.users().list_active(filter, page).await
    }

    /// Resolve the `{username}` path segment.
    pub async fn get(&self, username: &str) -> DomainResult<User> {
        self.repos
            .users()
            .get_active_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found("requested user not found"))
    }

    /// Account changes are only allowed on one's own account.
    pub fn ensure_self(&self, caller: &User, target: &User) -> DomainResult<()> {
        if caller.id != target.id {
            return Err(DomainError::Authorization(
                "you do not have permission to perform this action".into(),
            ));
        }
        Ok(())
    }

    // ── Commands ────────────────────────────────────────────────

    pub async fn change_password(
        &self,
        user: &User,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<User> {
        let valid = verify_password(current_password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::validation("current password is invalid"));
        }

        let new_hash = hash_password(new_password, self.bcrypt_cost).map_err(InfraError::from)?;
        let updated = self.repos.users().update_password(&user.id, &new_hash).await?;

        info!(user_id = %user.id, "Password changed");
        Ok(updated)
    }

    /// Soft delete, applying the configured membership policy.
    pub async fn remove(&self, user: &User) -> DomainResult<User> {
        let purge = self.removal_policy == UserRemovalPolicy::Purge;
        let removed = self.repos.users().deactivate(&user.id, purge).await?;

        info!(user_id = %user.id, purge_memberships = purge, "User removed");
        Ok(removed)
    }
}
