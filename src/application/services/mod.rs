//! Application services

mod access;
mod dashboard;
mod label;
mod membership;
mod project;
mod story;
mod user;

pub use access::{AccessService, ProjectAccess};
pub use dashboard::{Dashboard, DashboardService};
pub use label::LabelService;
pub use membership::MembershipService;
pub use project::ProjectService;
pub use story::{StoryInput, StoryService};
pub use user::{NewUser, UserService};
