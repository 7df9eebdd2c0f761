//! Membership aggregate
//!
//! Contains the Membership entity, the project role model, and the
//! repository interface.

pub mod model;
pub mod repository;
pub mod role;

pub use model::{MemberProject, Membership, MembershipDetails};
pub use repository::MembershipRepository;
pub use role::{ProjectRole, RoleFlags, RolePatch};
