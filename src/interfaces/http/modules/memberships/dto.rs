//! Membership DTOs
//!
//! Roles travel as a bag of boolean flags. See [`RolePatch`] for how a bag
//! maps onto a stored role.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{DomainError, DomainResult, MembershipDetails, RoleFlags, RolePatch};
use crate::interfaces::http::common::{PageInfo, ProjectRefView, UserSummaryView};
use crate::shared::validations::{present, required_str, JsonObject};

const ROLE_SHAPE: &str = "roles must be an object with boolean key-values";

/// Read `roles`. When `required` is false an absent bag means "no change".
pub fn parse_roles(body: &JsonObject, required: bool) -> DomainResult<RolePatch> {
    let roles = match present(body, "roles") {
        None if required => return Err(DomainError::validation("roles is missing from input")),
        None => return Ok(RolePatch::default()),
        Some(Value::Object(roles)) => roles,
        Some(_) => return Err(DomainError::validation(ROLE_SHAPE)),
    };

    if roles.is_empty() {
        return Err(DomainError::validation("roles input contains no roles"));
    }

    let mut patch = RolePatch::default();
    for (key, value) in roles {
        let Value::Bool(flag) = value else {
            return Err(DomainError::validation(ROLE_SHAPE));
        };
        let slot = match key.as_str() {
            "isAdmin" => &mut patch.is_admin,
            "isManager" => &mut patch.is_manager,
            "isDeveloper" => &mut patch.is_developer,
            "isViewer" => &mut patch.is_viewer,
            _ => continue,
        };
        *slot = Some(*flag);
    }

    if patch.is_empty() {
        return Err(DomainError::validation(
            "roles must contain at least one valid role",
        ));
    }
    Ok(patch)
}

/// Whether the raw body asks to set the admin flag.
///
/// Read before validation so the admin gate is applied ahead of any input
/// error.
pub fn requests_admin_flag(body: &JsonObject) -> bool {
    body.get("roles")
        .and_then(Value::as_object)
        .and_then(|roles| roles.get("isAdmin"))
        .is_some_and(Value::is_boolean)
}

/// Role flags as sent by clients
#[derive(Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RolesInput {
    pub is_admin: Option<bool>,
    pub is_manager: Option<bool>,
    pub is_developer: Option<bool>,
    pub is_viewer: Option<bool>,
}

/// Add a member; roles default to viewer
#[derive(Debug, ToSchema)]
pub struct CreateMembershipRequest {
    pub username: String,
    pub roles: Option<RolesInput>,
}

impl CreateMembershipRequest {
    pub fn parse(body: &JsonObject) -> DomainResult<(String, RolePatch)> {
        let username = required_str(body, "username", "username")?;
        let roles = parse_roles(body, false)?;
        Ok((username.to_string(), roles))
    }
}

#[derive(Debug, ToSchema)]
pub struct UpdateMembershipRequest {
    pub roles: RolesInput,
}

#[derive(Debug, ToSchema)]
pub struct DeleteMembershipRequest {
    pub confirm: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MembershipView {
    pub id: String,
    pub user: UserSummaryView,
    pub project: ProjectRefView,
    #[schema(value_type = Object)]
    pub roles: RoleFlags,
    pub created_on: DateTime<Utc>,
    pub updated_on: Option<DateTime<Utc>>,
}

impl From<MembershipDetails> for MembershipView {
    fn from(m: MembershipDetails) -> Self {
        Self {
            id: m.id,
            user: m.user.into(),
            project: m.project.into(),
            roles: RoleFlags::from_role(m.role),
            created_on: m.created_on,
            updated_on: m.updated_on,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MembershipEnvelope {
    pub membership: MembershipView,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MembershipListEnvelope {
    #[serde(flatten)]
    pub paging: PageInfo,
    pub project: ProjectRefView,
    pub memberships: Vec<MembershipView>,
}

/// Display names
#[derive(Debug, Serialize, ToSchema)]
pub struct UserNamesEnvelope {
    pub users: Vec<String>,
}
