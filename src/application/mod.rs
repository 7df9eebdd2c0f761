//! Application layer: use cases orchestrating the repositories

pub mod identity;
pub mod services;

pub use identity::{AuthService, AuthenticatedUser, Session};
pub use services::{
    AccessService, Dashboard, DashboardService, LabelService, MembershipService, NewUser,
    ProjectAccess, ProjectService, StoryInput, StoryService, UserService,
};
