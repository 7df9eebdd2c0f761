#[derive(Debug, Clone)]
pub struct CreateProjectDto {
    pub name: String,
    pub description: Option<String>,
    pub is_private: bool,
}

/// Partial update. `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default)]
pub struct UpdateProjectDto {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub is_private: Option<bool>,
}

impl UpdateProjectDto {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.is_private.is_none()
    }
}
