//! Repository trait for link/tag associations.

use crate::domain::entities::{LinkTag, NewLinkTag};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the link/tag join.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkTagRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkTagRepository: Send + Sync {
    /// Lists associations ordered by creation time, oldest first.
    async fn fetch(&self, limit: i64) -> Result<Vec<LinkTag>, AppError>;

    /// Finds an association by primary key.
    async fn get_by_id(&self, id: i64) -> Result<Option<LinkTag>, AppError>;

    /// Finds the association between a specific link and tag.
    async fn find_pair(&self, link_id: i64, tag_id: i64) -> Result<Option<LinkTag>, AppError>;

    /// Inserts an association and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the pair already exists.
    async fn store(&self, new_link_tag: NewLinkTag) -> Result<i64, AppError>;

    /// Overwrites both foreign keys and `updated_at` of the row identified by `link_tag.id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the new pair already exists.
    /// Returns [`AppError::Internal`] if the update did not touch exactly one row.
    async fn update(&self, link_tag: LinkTag) -> Result<i64, AppError>;

    /// Physically removes an association.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if no row was affected.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
