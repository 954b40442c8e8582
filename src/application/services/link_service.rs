//! Link lifecycle service: alias assignment, lookup, update and soft delete.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::json;

use crate::application::deadline::with_deadline;
use crate::application::pagination::clamp_limit;
use crate::domain::entities::{Link, LinkPatch, NewLink, TagAttachReport, normalize_tag_names};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::alias_generator::{generate_alias, resolve_alias_length, validate_alias};

/// How many freshly generated aliases are tried before giving up.
const MAX_ALIAS_ATTEMPTS: usize = 10;

/// Input of the create-link workflow.
#[derive(Debug, Clone, Default)]
pub struct CreateLink {
    pub user_id: i64,
    pub target: String,
    pub alias: Option<String>,
    /// Length of the generated alias; ignored when `alias` is set.
    pub length: Option<usize>,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

/// Service for creating, resolving and maintaining short links.
///
/// Deleted links are invisible here: every lookup that finds a soft-deleted
/// row reports [`AppError::NotFound`].
pub struct LinkService<R: ?Sized + LinkRepository = dyn LinkRepository> {
    repository: Arc<R>,
    timeout: Duration,
    default_alias_length: usize,
}

impl<R: ?Sized + LinkRepository> LinkService<R> {
    /// Creates a new link service.
    ///
    /// - `timeout` - deadline applied to each repository call
    /// - `default_alias_length` - generated alias length when a request gives none
    pub fn new(repository: Arc<R>, timeout: Duration, default_alias_length: usize) -> Self {
        Self {
            repository,
            timeout,
            default_alias_length,
        }
    }

    /// Lists active links, oldest first. The limit is clamped to `1..=100`
    /// (default 10).
    pub async fn fetch(&self, limit: Option<i64>) -> Result<Vec<Link>, AppError> {
        with_deadline(self.timeout, self.repository.fetch(clamp_limit(limit))).await
    }

    /// Returns an active link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link is missing or soft-deleted.
    pub async fn get_by_id(&self, id: i64) -> Result<Link, AppError> {
        with_deadline(self.timeout, self.repository.get_by_id(id))
            .await?
            .filter(|link| !link.is_deleted())
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))
    }

    /// Resolves an alias to its active link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no active link uses the alias.
    pub async fn get_by_alias(&self, alias: &str) -> Result<Link, AppError> {
        with_deadline(self.timeout, self.repository.get_by_alias(alias))
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "alias": alias })))
    }

    /// Creates a link and attaches its tags as one unit of work.
    ///
    /// # Alias assignment
    ///
    /// - An explicit alias is validated and used as-is; a collision is a
    ///   [`AppError::Conflict`]
    /// - Otherwise a random alphanumeric alias of `length` (3-10) or the
    ///   configured default is generated, regenerating on collision up to
    ///   10 times
    ///
    /// Tag names are trimmed and deduplicated before storage.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed explicit alias.
    /// Returns [`AppError::Conflict`] if the explicit alias is taken.
    /// Returns [`AppError::Internal`] if any tag failed to attach (nothing is
    /// persisted; details carry the per-tag report) or no free alias was found.
    pub async fn create_with_tags(
        &self,
        input: CreateLink,
    ) -> Result<(i64, TagAttachReport), AppError> {
        let tags = normalize_tag_names(&input.tags);

        if let Some(alias) = input.alias {
            validate_alias(&alias)?;
            let new_link = NewLink {
                user_id: input.user_id,
                alias,
                target: input.target,
                description: input.description,
            };
            return with_deadline(self.timeout, self.repository.store_with_tags(new_link, tags))
                .await;
        }

        let length = resolve_alias_length(input.length, self.default_alias_length);

        for attempt in 1..=MAX_ALIAS_ATTEMPTS {
            let new_link = NewLink {
                user_id: input.user_id,
                alias: generate_alias(length),
                target: input.target.clone(),
                description: input.description.clone(),
            };

            match with_deadline(
                self.timeout,
                self.repository.store_with_tags(new_link, tags.clone()),
            )
            .await
            {
                Err(e) if e.is_conflict() => {
                    tracing::debug!(attempt, length, "Generated alias collided, retrying");
                }
                other => return other,
            }
        }

        Err(AppError::internal(
            "Failed to generate unique alias",
            json!({ "reason": "Too many collisions", "length": length }),
        ))
    }

    /// Applies a partial update to an active link and stamps `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link is missing or soft-deleted.
    /// Returns [`AppError::Validation`] for a malformed new alias.
    /// Returns [`AppError::Conflict`] if the new alias is taken.
    pub async fn update(&self, id: i64, patch: LinkPatch) -> Result<Link, AppError> {
        if let Some(alias) = &patch.alias {
            validate_alias(alias)?;
        }

        let mut link = self.get_by_id(id).await?;
        link.apply(patch);
        link.updated_at = Utc::now();

        with_deadline(self.timeout, self.repository.update(link.clone())).await?;
        Ok(link)
    }

    /// Soft-deletes an active link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link is missing or already deleted.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.get_by_id(id).await?;
        with_deadline(self.timeout, self.repository.delete(id)).await?;

        tracing::info!(link_id = id, "Link deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::FailedTag;
    use crate::domain::repositories::MockLinkRepository;
    use mockall::Sequence;
    use serde_json::Value;

    const TIMEOUT: Duration = Duration::from_secs(2);

    fn create_test_link(id: i64, alias: &str, deleted: bool) -> Link {
        let now = Utc::now();
        Link::new(
            id,
            0,
            alias.to_string(),
            "https://example.com".to_string(),
            None,
            now,
            now,
            deleted.then_some(now),
        )
    }

    fn service(repo: MockLinkRepository) -> LinkService<MockLinkRepository> {
        LinkService::new(Arc::new(repo), TIMEOUT, 8)
    }

    fn create_input(tags: &[&str]) -> CreateLink {
        CreateLink {
            target: "https://example.com".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_clamps_limit() {
        let mut repo = MockLinkRepository::new();
        let mut seq = Sequence::new();
        for expected in [10_i64, 100, 10, 25] {
            repo.expect_fetch()
                .withf(move |limit| *limit == expected)
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(vec![]));
        }

        let service = service(repo);
        service.fetch(None).await.unwrap();
        service.fetch(Some(500)).await.unwrap();
        service.fetch(Some(0)).await.unwrap();
        service.fetch(Some(25)).await.unwrap();
    }

    #[tokio::test]
    async fn test_get_by_id_hides_deleted() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get_by_id()
            .returning(|id| Ok(Some(create_test_link(id, "gone", true))));

        let err = service(repo).get_by_id(3).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_get_by_alias_not_found() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get_by_alias()
            .withf(|alias| alias == "missing")
            .times(1)
            .returning(|_| Ok(None));

        let err = service(repo).get_by_alias("missing").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.details(), &json!({ "alias": "missing" }));
    }

    #[tokio::test]
    async fn test_create_generates_default_length_alias() {
        let mut repo = MockLinkRepository::new();
        repo.expect_store_with_tags()
            .withf(|new_link, tags| {
                new_link.alias.len() == 8
                    && new_link.alias.chars().all(|c| c.is_ascii_alphanumeric())
                    && tags == &vec!["news".to_string()]
            })
            .times(1)
            .returning(|_, tags| {
                Ok((
                    1,
                    TagAttachReport {
                        attached: tags,
                        failed: vec![],
                    },
                ))
            });

        let (id, report) = service(repo)
            .create_with_tags(create_input(&[" news ", "news", ""]))
            .await
            .unwrap();

        assert_eq!(id, 1);
        assert_eq!(report.attached, vec!["news".to_string()]);
    }

    #[tokio::test]
    async fn test_create_uses_requested_length() {
        let mut repo = MockLinkRepository::new();
        repo.expect_store_with_tags()
            .withf(|new_link, _| new_link.alias.len() == 4)
            .times(1)
            .returning(|_, _| Ok((1, TagAttachReport::default())));

        let input = CreateLink {
            length: Some(4),
            ..create_input(&[])
        };
        assert!(service(repo).create_with_tags(input).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_retries_generated_alias_on_conflict() {
        let mut repo = MockLinkRepository::new();
        let mut seq = Sequence::new();
        repo.expect_store_with_tags()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(AppError::conflict("Link is exists", Value::Null)));
        repo.expect_store_with_tags()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok((9, TagAttachReport::default())));

        let (id, _) = service(repo)
            .create_with_tags(create_input(&[]))
            .await
            .unwrap();
        assert_eq!(id, 9);
    }

    #[tokio::test]
    async fn test_create_gives_up_after_max_attempts() {
        let mut repo = MockLinkRepository::new();
        repo.expect_store_with_tags()
            .times(MAX_ALIAS_ATTEMPTS)
            .returning(|_, _| Err(AppError::conflict("Link is exists", Value::Null)));

        let err = service(repo)
            .create_with_tags(create_input(&[]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_create_explicit_alias_conflict_is_not_retried() {
        let mut repo = MockLinkRepository::new();
        repo.expect_store_with_tags()
            .withf(|new_link, _| new_link.alias == "taken")
            .times(1)
            .returning(|_, _| Err(AppError::conflict("Link is exists", Value::Null)));

        let input = CreateLink {
            alias: Some("taken".to_string()),
            ..create_input(&[])
        };
        let err = service(repo).create_with_tags(input).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_alias() {
        let mut repo = MockLinkRepository::new();
        repo.expect_store_with_tags().times(0);

        let input = CreateLink {
            alias: Some("bad alias".to_string()),
            ..create_input(&[])
        };
        let err = service(repo).create_with_tags(input).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_surfaces_tag_failure_report() {
        let mut repo = MockLinkRepository::new();
        repo.expect_store_with_tags().times(1).returning(|_, _| {
            let report = TagAttachReport {
                attached: vec!["ok".to_string()],
                failed: vec![FailedTag {
                    name: "bad".to_string(),
                    error: AppError::internal("Internal Server Error", Value::Null)
                        .to_error_info(),
                }],
            };
            Err(AppError::internal(
                "Failed to attach tags, link was not created",
                json!({ "tags": report }),
            ))
        });

        let err = service(repo)
            .create_with_tags(create_input(&["ok", "bad"]))
            .await
            .unwrap_err();
        assert_eq!(err.details()["tags"]["failed"][0]["name"], "bad");
    }

    #[tokio::test]
    async fn test_update_stamps_and_applies_patch() {
        let mut repo = MockLinkRepository::new();
        let original = create_test_link(4, "before", false);
        let original_updated_at = original.updated_at;
        repo.expect_get_by_id()
            .times(1)
            .returning(move |_| Ok(Some(original.clone())));
        repo.expect_update()
            .withf(move |link| link.alias == "after" && link.updated_at >= original_updated_at)
            .times(1)
            .returning(|link| Ok(link.id));

        let patch = LinkPatch {
            alias: Some("after".to_string()),
            description: Some(Some("new".to_string())),
            ..Default::default()
        };
        let link = service(repo).update(4, patch).await.unwrap();

        assert_eq!(link.alias, "after");
        assert_eq!(link.description.as_deref(), Some("new"));
        assert_eq!(link.target, "https://example.com");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        repo.expect_update().times(0);

        let err = service(repo)
            .update(99, LinkPatch::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_checks_existence() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        repo.expect_delete().times(0);

        assert!(service(repo).delete(5).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_already_deleted_is_not_found() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get_by_id()
            .returning(|id| Ok(Some(create_test_link(id, "old", true))));
        repo.expect_delete().times(0);

        assert!(service(repo).delete(5).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_active_link() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get_by_id()
            .returning(|id| Ok(Some(create_test_link(id, "live", false))));
        repo.expect_delete()
            .withf(|id| *id == 5)
            .times(1)
            .returning(|_| Ok(()));

        assert!(service(repo).delete(5).await.is_ok());
    }
}
