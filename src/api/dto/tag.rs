//! DTOs for tag endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Tag;

/// Request body for `POST /tags` and `POST /links/{id}/tags`.
#[derive(Debug, Deserialize, Validate)]
pub struct TagNameRequest {
    #[validate(custom(function = validate_tag_name))]
    pub name: String,
}

/// Rejects blank names and names over 64 characters.
pub fn validate_tag_name(name: &str) -> Result<(), validator::ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(validator::ValidationError::new("required"));
    }
    if trimmed.chars().count() > 64 {
        return Err(validator::ValidationError::new("length"));
    }
    Ok(())
}

/// Tag as embedded in link responses.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TagSummary {
    pub id: i64,
    pub name: String,
}

impl From<Tag> for TagSummary {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
        }
    }
}

/// Full tag representation.
#[derive(Debug, Serialize)]
pub struct TagResponse {
    pub id: i64,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            created_at: tag.created_at,
            updated_at: tag.updated_at,
        }
    }
}
