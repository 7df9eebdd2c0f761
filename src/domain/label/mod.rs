//! Label aggregate (story priorities and statuses)

pub mod model;
pub mod repository;

mod dto;

pub use dto::{CreateLabelDto, UpdateLabelDto};
pub use model::{Label, LabelKind, LabelSummary};
pub use repository::LabelRepository;
