//! Repository trait for tags.

use crate::domain::entities::{NewTag, Tag};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing tags.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTagRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Lists tags ordered by creation time, oldest first.
    async fn fetch(&self, limit: i64) -> Result<Vec<Tag>, AppError>;

    /// Finds a tag by primary key.
    async fn get_by_id(&self, id: i64) -> Result<Option<Tag>, AppError>;

    /// Finds a tag by its unique name.
    async fn get_by_name(&self, name: &str) -> Result<Option<Tag>, AppError>;

    /// Lists the tags attached to a link, ordered by tag creation time.
    async fn fetch_by_link_id(&self, link_id: i64) -> Result<Vec<Tag>, AppError>;

    /// Inserts a tag and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the name is already used.
    async fn store(&self, new_tag: NewTag) -> Result<i64, AppError>;

    /// Returns the id of the tag called `name`, inserting it first if needed.
    ///
    /// Implementations must do this atomically: concurrent calls with the same
    /// name resolve to the same row.
    async fn first_or_create(&self, name: &str) -> Result<i64, AppError>;

    /// Overwrites the name and `updated_at` of the row identified by `tag.id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the new name is taken.
    /// Returns [`AppError::Internal`] if the update did not touch exactly one row.
    async fn update(&self, tag: Tag) -> Result<i64, AppError>;

    /// Physically removes a tag together with its associations.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if no row was affected.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
