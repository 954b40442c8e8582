//! Tag entity and the outcome report of attaching tags to a link.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ErrorInfo;

/// A free-form label. Names are unique across the whole store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tag {
    /// Creates a new Tag instance.
    pub fn new(id: i64, name: String, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            created_at,
            updated_at,
        }
    }
}

/// Input data for creating a new tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub name: String,
}

/// A tag that could not be attached, with the reason.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FailedTag {
    pub name: String,
    pub error: ErrorInfo,
}

/// Per-tag outcome of a create-with-tags unit of work.
///
/// `attached` holds names in request order. When `failed` is non-empty the
/// unit of work was rolled back and nothing in `attached` was persisted.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct TagAttachReport {
    pub attached: Vec<String>,
    pub failed: Vec<FailedTag>,
}

impl TagAttachReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Trims tag names and drops blanks and duplicates, keeping first-seen order.
pub fn normalize_tag_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for name in names {
        let name = name.as_ref().trim();
        if name.is_empty() || out.iter().any(|n| n == name) {
            continue;
        }
        out.push(name.to_string());
    }
    out
}
