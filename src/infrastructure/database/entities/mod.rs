//! Database entities module

pub mod label;
pub mod membership;
pub mod project;
pub mod story;
pub mod user;

pub use label::Entity as Label;
pub use membership::Entity as Membership;
pub use project::Entity as Project;
pub use story::Entity as Story;
pub use user::Entity as User;
