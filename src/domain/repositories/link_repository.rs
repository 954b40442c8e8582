//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink, TagAttachReport};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// Soft-deleted links are invisible to [`fetch`](Self::fetch) and
/// [`get_by_alias`](Self::get_by_alias) but are still returned by
/// [`get_by_id`](Self::get_by_id), so callers can tell "deleted" from "never existed".
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Lists active links ordered by creation time, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn fetch(&self, limit: i64) -> Result<Vec<Link>, AppError>;

    /// Finds a link by primary key, including soft-deleted rows.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn get_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Finds an active link by alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn get_by_alias(&self, alias: &str) -> Result<Option<Link>, AppError>;

    /// Inserts a link and returns its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if an active link already uses the alias.
    /// Returns [`AppError::Internal`] on database errors.
    async fn store(&self, new_link: NewLink) -> Result<i64, AppError>;

    /// Inserts a link and attaches `tag_names` as one unit of work.
    ///
    /// Each tag is found-or-created and associated independently so that every
    /// outcome lands in the report. If any tag fails the whole unit is rolled
    /// back and an error carrying the report in its details is returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the alias is taken.
    /// Returns [`AppError::Internal`] if any tag could not be attached, or on
    /// database errors.
    async fn store_with_tags(
        &self,
        new_link: NewLink,
        tag_names: Vec<String>,
    ) -> Result<(i64, TagAttachReport), AppError>;

    /// Overwrites every mutable column of the row identified by `link.id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the new alias is taken.
    /// Returns [`AppError::Internal`] if the update did not touch exactly one row.
    async fn update(&self, link: Link) -> Result<i64, AppError>;

    /// Soft-deletes a link by setting `deleted_at = now()`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if no active row was affected.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
