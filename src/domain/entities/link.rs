//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL with its owner and lifecycle timestamps.
///
/// A link is *active* while `deleted_at` is `None`. Deleting a link only stamps
/// `deleted_at`; the row stays in storage and its alias becomes free again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub user_id: i64,
    pub alias: String,
    pub target: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Link {
    /// Creates a new Link instance.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        user_id: i64,
        alias: String,
        target: String,
        description: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            user_id,
            alias,
            target,
            description,
            created_at,
            updated_at,
            deleted_at,
        }
    }

    /// Returns true if the link has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Applies a partial update in place. `None` fields are left unchanged.
    pub fn apply(&mut self, patch: LinkPatch) {
        if let Some(target) = patch.target {
            self.target = target;
        }
        if let Some(alias) = patch.alias {
            self.alias = alias;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }
}

/// Input data for creating a new link.
///
/// The alias is always concrete here; generation happens before the link
/// reaches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub user_id: i64,
    pub alias: String,
    pub target: String,
    pub description: Option<String>,
}

/// Partial update for an existing link.
///
/// `description: Some(None)` clears the description; `Some(Some(d))` sets it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPatch {
    pub target: Option<String>,
    pub alias: Option<String>,
    pub description: Option<Option<String>>,
}
