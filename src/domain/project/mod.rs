//! Project aggregate

pub mod model;
pub mod repository;

mod dto;

pub use dto::{CreateProjectDto, UpdateProjectDto};
pub use model::{Project, ProjectRef, ProjectStatistics};
pub use repository::ProjectRepository;
