//! Project domain entity

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_private: bool,
    pub is_active: bool,
    pub created_on: DateTime<Utc>,
    pub updated_on: Option<DateTime<Utc>>,
    pub deleted_on: Option<DateTime<Utc>>,
}

impl Project {
    pub fn reference(&self) -> ProjectRef {
        ProjectRef {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// `{id, name}` pair embedded in child resources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRef {
    pub id: String,
    pub name: String,
}

/// Counts returned with `includeStatistics=true`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectStatistics {
    pub memberships: u64,
    pub stories: u64,
}
