//! Tag lookup and maintenance service.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::json;

use crate::application::deadline::with_deadline;
use crate::application::pagination::clamp_limit;
use crate::domain::entities::{NewTag, Tag};
use crate::domain::repositories::TagRepository;
use crate::error::AppError;

/// Service for tags.
pub struct TagService<R: ?Sized + TagRepository = dyn TagRepository> {
    repository: Arc<R>,
    timeout: Duration,
}

impl<R: ?Sized + TagRepository> TagService<R> {
    pub fn new(repository: Arc<R>, timeout: Duration) -> Self {
        Self {
            repository,
            timeout,
        }
    }

    /// Lists tags, oldest first, with the usual limit clamping.
    pub async fn fetch(&self, limit: Option<i64>) -> Result<Vec<Tag>, AppError> {
        with_deadline(self.timeout, self.repository.fetch(clamp_limit(limit))).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Tag, AppError> {
        with_deadline(self.timeout, self.repository.get_by_id(id))
            .await?
            .ok_or_else(|| AppError::not_found("Tag not found", json!({ "id": id })))
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Tag, AppError> {
        with_deadline(self.timeout, self.repository.get_by_name(name))
            .await?
            .ok_or_else(|| AppError::not_found("Tag not found", json!({ "name": name })))
    }

    /// Tags attached to a link, in tag creation order.
    pub async fn fetch_by_link_id(&self, link_id: i64) -> Result<Vec<Tag>, AppError> {
        with_deadline(self.timeout, self.repository.fetch_by_link_id(link_id)).await
    }

    /// Creates a tag and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a tag with this name exists.
    pub async fn store(&self, name: &str) -> Result<Tag, AppError> {
        let new_tag = NewTag {
            name: name.trim().to_string(),
        };
        let id = with_deadline(self.timeout, self.repository.store(new_tag)).await?;
        self.get_by_id(id).await
    }

    /// Returns the tag with this name, creating it if needed.
    pub async fn first_or_create(&self, name: &str) -> Result<Tag, AppError> {
        let name = name.trim();
        let id = with_deadline(self.timeout, self.repository.first_or_create(name)).await?;
        self.get_by_id(id).await
    }

    /// Renames a tag and stamps `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the tag does not exist.
    /// Returns [`AppError::Conflict`] if another tag already has the name.
    pub async fn update(&self, id: i64, name: &str) -> Result<Tag, AppError> {
        let mut tag = self.get_by_id(id).await?;
        tag.name = name.trim().to_string();
        tag.updated_at = Utc::now();

        with_deadline(self.timeout, self.repository.update(tag.clone())).await?;
        Ok(tag)
    }

    /// Removes a tag together with its link associations.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the tag does not exist.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.get_by_id(id).await?;
        with_deadline(self.timeout, self.repository.delete(id)).await?;

        tracing::info!(tag_id = id, "Tag deleted");
        Ok(())
    }
}
