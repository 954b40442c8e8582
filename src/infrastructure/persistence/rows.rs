//! Row shapes decoded from PostgreSQL result sets.

use chrono::{DateTime, Utc};

use crate::domain::entities::{Link, LinkTag, Tag};

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct LinkRow {
    id: i64,
    user_id: i64,
    alias: String,
    target: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(
            r.id,
            r.user_id,
            r.alias,
            r.target,
            r.description,
            r.created_at,
            r.updated_at,
            r.deleted_at,
        )
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct TagRow {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TagRow> for Tag {
    fn from(r: TagRow) -> Self {
        Tag::new(r.id, r.name, r.created_at, r.updated_at)
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct LinkTagRow {
    id: i64,
    link_id: i64,
    tag_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LinkTagRow> for LinkTag {
    fn from(r: LinkTagRow) -> Self {
        LinkTag::new(r.id, r.link_id, r.tag_id, r.created_at, r.updated_at)
    }
}
