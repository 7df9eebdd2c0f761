//! Label domain entity
//!
//! Priorities and statuses share one shape: a project-scoped name with an
//! optional colour. [`LabelKind`] tells them apart and carries the nouns
//! used in their API messages.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelKind {
    Priority,
    Status,
}

impl LabelKind {
    /// Singular noun: `priority`, `status`
    pub fn noun(self) -> &'static str {
        match self {
            Self::Priority => "priority",
            Self::Status => "status",
        }
    }

    /// Collection key in list payloads: `priorities`, `status`
    pub fn collection(self) -> &'static str {
        match self {
            Self::Priority => "priorities",
            Self::Status => "status",
        }
    }
}

impl std::fmt::Display for LabelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.noun())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub id: String,
    pub project_id: String,
    pub kind: LabelKind,
    pub name: String,
    /// `#RRGGBB`
    pub color: Option<String>,
    pub transparent: bool,
    pub created_on: DateTime<Utc>,
    pub updated_on: Option<DateTime<Utc>>,
}

impl Label {
    pub fn summary(&self) -> LabelSummary {
        LabelSummary {
            name: self.name.clone(),
            color: self.color.clone(),
            transparent: self.transparent,
        }
    }
}

/// Label as embedded in a story
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSummary {
    pub name: String,
    pub color: Option<String>,
    pub transparent: bool,
}
