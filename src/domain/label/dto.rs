#[derive(Debug, Clone)]
pub struct CreateLabelDto {
    pub name: String,
    pub color: Option<String>,
    pub transparent: bool,
}

/// Partial update. `color: Some(None)` clears the colour.
#[derive(Debug, Clone, Default)]
pub struct UpdateLabelDto {
    pub name: Option<String>,
    pub color: Option<Option<String>>,
    pub transparent: Option<bool>,
}

impl UpdateLabelDto {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.color.is_none() && self.transparent.is_none()
    }
}
