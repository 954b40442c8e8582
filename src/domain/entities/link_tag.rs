//! Association between a link and a tag.

use chrono::{DateTime, Utc};

/// One row of the link/tag join. A `(link_id, tag_id)` pair appears at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTag {
    pub id: i64,
    pub link_id: i64,
    pub tag_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LinkTag {
    /// Creates a new LinkTag instance.
    pub fn new(
        id: i64,
        link_id: i64,
        tag_id: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            link_id,
            tag_id,
            created_at,
            updated_at,
        }
    }
}

/// Input data for attaching a tag to a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewLinkTag {
    pub link_id: i64,
    pub tag_id: i64,
}
