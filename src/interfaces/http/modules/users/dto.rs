//! User DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::NewUser;
use crate::domain::{DomainResult, User};
use crate::interfaces::http::common::PageInfo;
use crate::shared::validations::{check_password, check_username, required_str, JsonObject};

// ── Requests ───────────────────────────────────────────────────

/// Create user request
#[derive(Debug, ToSchema)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
}

impl CreateUserRequest {
    pub fn from_body(body: &JsonObject) -> DomainResult<Self> {
        let username = required_str(body, "username", "username")?;
        check_username(username)?;
        let password = required_str(body, "password", "password")?;
        check_password(password)?;

        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            username: req.username,
            password: req.password,
            display_name: None,
        }
    }
}

/// Change password request
#[derive(Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub password: String,
}

impl ChangePasswordRequest {
    pub fn from_body(body: &JsonObject) -> DomainResult<Self> {
        let current_password = required_str(body, "currentPassword", "current password")?;
        let password = required_str(body, "password", "password")?;
        check_password(password)?;

        Ok(Self {
            current_password: current_password.to_string(),
            password: password.to_string(),
        })
    }
}

/// Deletion confirmation: the username, repeated
#[derive(Debug, ToSchema)]
pub struct DeleteUserRequest {
    pub confirm: String,
}

// ── Responses ──────────────────────────────────────────────────

/// User as listed
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserListItem {
    pub username: String,
    pub display_name: String,
    pub created_on: DateTime<Utc>,
}

impl From<User> for UserListItem {
    fn from(u: User) -> Self {
        Self {
            username: u.username,
            display_name: u.display_name,
            created_on: u.created_on,
        }
    }
}

/// User as retrieved
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub username: String,
    pub display_name: String,
    pub created_on: DateTime<Utc>,
    pub updated_on: Option<DateTime<Utc>>,
}

impl From<User> for UserView {
    fn from(u: User) -> Self {
        Self {
            username: u.username,
            display_name: u.display_name,
            created_on: u.created_on,
            updated_on: u.updated_on,
        }
    }
}

/// User as returned by a delete
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemovedUserView {
    pub username: String,
    pub display_name: String,
    pub is_active: bool,
    pub created_on: DateTime<Utc>,
    pub updated_on: Option<DateTime<Utc>>,
    pub deleted_on: Option<DateTime<Utc>>,
}

impl From<User> for RemovedUserView {
    fn from(u: User) -> Self {
        Self {
            username: u.username,
            display_name: u.display_name,
            is_active: u.is_active,
            created_on: u.created_on,
            updated_on: u.updated_on,
            deleted_on: u.deleted_on,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedUserEnvelope {
    pub user: UserListItem,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserEnvelope {
    pub user: UserView,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RemovedUserEnvelope {
    pub user: RemovedUserView,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserListEnvelope {
    #[serde(flatten)]
    pub paging: PageInfo,
    pub users: Vec<UserListItem>,
}
