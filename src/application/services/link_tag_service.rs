//! Link/tag association service.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use crate::application::deadline::with_deadline;
use crate::domain::entities::NewLinkTag;
use crate::domain::repositories::LinkTagRepository;
use crate::error::AppError;

/// Service for attaching tags to links and detaching them.
pub struct LinkTagService<R: ?Sized + LinkTagRepository = dyn LinkTagRepository> {
    repository: Arc<R>,
    timeout: Duration,
}

impl<R: ?Sized + LinkTagRepository> LinkTagService<R> {
    pub fn new(repository: Arc<R>, timeout: Duration) -> Self {
        Self {
            repository,
            timeout,
        }
    }

    /// Associates a tag with a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the tag is already attached.
    pub async fn attach(&self, link_id: i64, tag_id: i64) -> Result<i64, AppError> {
        let new_link_tag = NewLinkTag { link_id, tag_id };
        with_deadline(self.timeout, self.repository.store(new_link_tag)).await
    }

    /// Removes the association between `link_id` and `tag_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the tag is not attached to the link.
    pub async fn detach(&self, link_id: i64, tag_id: i64) -> Result<(), AppError> {
        let link_tag = with_deadline(self.timeout, self.repository.find_pair(link_id, tag_id))
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "Tag is not attached to this link",
                    json!({ "link_id": link_id, "tag_id": tag_id }),
                )
            })?;

        with_deadline(self.timeout, self.repository.delete(link_tag.id)).await?;

        tracing::info!(link_id, tag_id, "Tag detached");
        Ok(())
    }
}
