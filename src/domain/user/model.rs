//! User domain entity

use chrono::{DateTime, Utc};

/// Account holder
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    /// Always stored lowercase
    pub username: String,
    /// Username as originally typed
    pub display_name: String,
    pub password_hash: String,
    /// Key carried in session tokens; replacing it revokes them
    pub api_key: String,
    pub is_active: bool,
    pub created_on: DateTime<Utc>,
    pub updated_on: Option<DateTime<Utc>>,
    pub deleted_on: Option<DateTime<Utc>>,
}

impl User {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            username: self.username.clone(),
            display_name: self.display_name.clone(),
        }
    }
}

/// Public face of a user embedded in other resources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub username: String,
    pub display_name: String,
}
