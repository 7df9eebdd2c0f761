//! Project roles
//!
//! A membership holds at most one [`ProjectRole`]. Roles are ranked
//! `Viewer < Developer < Manager < Admin`; a gate passes when the member's
//! rank is at least the required one. A membership without a role is still
//! a member but passes no gate.
//!
//! Clients read and write roles as a bag of flags (`isAdmin`, `isManager`,
//! `isDeveloper`, `isViewer`). [`RoleFlags`] converts between the two views.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectRole {
    Viewer,
    Developer,
    Manager,
    Admin,
}

impl ProjectRole {
    pub fn rank(self) -> u8 {
        match self {
            Self::Viewer => 1,
            Self::Developer => 2,
            Self::Manager => 3,
            Self::Admin => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Developer => "developer",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }

    /// Whether a holder of `self` passes a gate requiring `required`.
    pub fn satisfies(self, required: ProjectRole) -> bool {
        self.rank() >= required.rank()
    }
}

impl std::fmt::Display for ProjectRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProjectRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "viewer" => Ok(Self::Viewer),
            "developer" => Ok(Self::Developer),
            "manager" => Ok(Self::Manager),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Wire representation of a role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleFlags {
    pub is_admin: bool,
    pub is_manager: bool,
    pub is_developer: bool,
    pub is_viewer: bool,
}

impl RoleFlags {
    /// Cumulative flags: every flag at or below `role` is set.
    pub fn from_role(role: Option<ProjectRole>) -> Self {
        let rank = role.map(ProjectRole::rank).unwrap_or(0);
        Self {
            is_admin: rank >= ProjectRole::Admin.rank(),
            is_manager: rank >= ProjectRole::Manager.rank(),
            is_developer: rank >= ProjectRole::Developer.rank(),
            is_viewer: rank >= ProjectRole::Viewer.rank(),
        }
    }

    /// Highest role whose flag is set.
    pub fn highest(&self) -> Option<ProjectRole> {
        if self.is_admin {
            Some(ProjectRole::Admin)
        } else if self.is_manager {
            Some(ProjectRole::Manager)
        } else if self.is_developer {
            Some(ProjectRole::Developer)
        } else if self.is_viewer {
            Some(ProjectRole::Viewer)
        } else {
            None
        }
    }

    pub fn apply(mut self, patch: &RolePatch) -> Self {
        if let Some(v) = patch.is_admin {
            self.is_admin = v;
        }
        if let Some(v) = patch.is_manager {
            self.is_manager = v;
        }
        if let Some(v) = patch.is_developer {
            self.is_developer = v;
        }
        if let Some(v) = patch.is_viewer {
            self.is_viewer = v;
        }
        self
    }
}

/// Role flags supplied by a client; absent flags keep their current value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RolePatch {
    pub is_admin: Option<bool>,
    pub is_manager: Option<bool>,
    pub is_developer: Option<bool>,
    pub is_viewer: Option<bool>,
}

impl RolePatch {
    pub fn is_empty(&self) -> bool {
        self.is_admin.is_none()
            && self.is_manager.is_none()
            && self.is_developer.is_none()
            && self.is_viewer.is_none()
    }

    /// Whether the patch touches the admin flag, which only admins may do.
    pub fn touches_admin(&self) -> bool {
        self.is_admin.is_some()
    }

    /// Role for a new membership: viewer unless the patch says otherwise.
    pub fn initial_role(&self) -> Option<ProjectRole> {
        self.resolve(Some(ProjectRole::Viewer))
    }

    /// Role after applying the patch on top of `current`.
    pub fn resolve(&self, current: Option<ProjectRole>) -> Option<ProjectRole> {
        RoleFlags::from_role(current).apply(self).highest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_are_ordered() {
        assert!(ProjectRole::Admin.satisfies(ProjectRole::Manager));
        assert!(ProjectRole::Manager.satisfies(ProjectRole::Developer));
        assert!(ProjectRole::Developer.satisfies(ProjectRole::Viewer));
        assert!(!ProjectRole::Viewer.satisfies(ProjectRole::Developer));
        assert!(!ProjectRole::Manager.satisfies(ProjectRole::Admin));
        assert!(ProjectRole::Viewer < ProjectRole::Admin);
    }

    #[test]
    fn flags_are_cumulative() {
        let flags = RoleFlags::from_role(Some(ProjectRole::Manager));
        assert_eq!(
            flags,
            RoleFlags {
                is_admin: false,
                is_manager: true,
                is_developer: true,
                is_viewer: true
            }
        );
        assert_eq!(RoleFlags::from_role(None), RoleFlags::default());
    }

    #[test]
    fn new_memberships_default_to_viewer() {
        assert_eq!(RolePatch::default().initial_role(), Some(ProjectRole::Viewer));
        let developer = RolePatch {
            is_developer: Some(true),
            ..Default::default()
        };
        assert_eq!(developer.initial_role(), Some(ProjectRole::Developer));
    }

    #[test]
    fn clearing_every_flag_leaves_no_role() {
        let none = RolePatch {
            is_viewer: Some(false),
            ..Default::default()
        };
        assert_eq!(none.initial_role(), None);
    }

    #[test]
    fn demoting_an_admin_falls_to_manager() {
        let patch = RolePatch {
            is_admin: Some(false),
            ..Default::default()
        };
        assert_eq!(patch.resolve(Some(ProjectRole::Admin)), Some(ProjectRole::Manager));
        assert!(patch.touches_admin());
    }

    #[test]
    fn serialises_as_camel_case_flags() {
        let json = serde_json::to_value(RoleFlags::from_role(Some(ProjectRole::Developer))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "isAdmin": false,
                "isManager": false,
                "isDeveloper": true,
                "isViewer": true
            })
        );
    }

    #[test]
    fn parses_role_names() {
        assert_eq!("Manager".parse::<ProjectRole>().unwrap(), ProjectRole::Manager);
        assert!("owner".parse::<ProjectRole>().is_err());
    }
}
