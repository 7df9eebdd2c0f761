//! Story aggregate

pub mod model;
pub mod repository;

mod dto;

pub use dto::{CreateStoryDto, UpdateStoryDto};
pub use model::{StoryDetails, POINTS_MAX, POINTS_MIN};
pub use repository::StoryRepository;
