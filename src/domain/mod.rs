pub mod label;
pub mod membership;
pub mod project;
pub mod repositories;
pub mod story;
pub mod user;

// Re-export commonly used types
pub use label::{Label, LabelKind, LabelSummary};
pub use membership::{MemberProject, Membership, MembershipDetails, ProjectRole, RoleFlags, RolePatch};
pub use project::{Project, ProjectRef, ProjectStatistics};
pub use repositories::{DomainResult, RepositoryProvider};
pub use story::StoryDetails;
pub use user::{User, UserSummary};

pub use crate::shared::errors::DomainError;
