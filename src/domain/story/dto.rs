#[derive(Debug, Clone)]
pub struct CreateStoryDto {
    pub name: String,
    pub details: Option<String>,
    pub points: Option<i32>,
    pub creator_id: String,
    pub owner_id: Option<String>,
    pub priority_id: Option<String>,
    pub status_id: Option<String>,
}

/// Partial update. `Some(None)` clears a nullable field.
#[derive(Debug, Clone, Default)]
pub struct UpdateStoryDto {
    pub name: Option<String>,
    pub details: Option<Option<String>>,
    pub points: Option<i32>,
    pub owner_id: Option<Option<String>>,
    pub priority_id: Option<Option<String>>,
    pub status_id: Option<Option<String>>,
}
