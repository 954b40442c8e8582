//! Shared application state injected into every handler.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use crate::application::services::{LinkService, LinkTagService, TagService};
use crate::domain::repositories::{LinkRepository, LinkTagRepository, TagRepository};
use crate::infrastructure::persistence::{PgLinkRepository, PgLinkTagRepository, PgTagRepository};

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub tag_service: Arc<TagService>,
    pub link_tag_service: Arc<LinkTagService>,
}

impl AppState {
    /// Wires services over arbitrary repository implementations.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        tag_repository: Arc<dyn TagRepository>,
        link_tag_repository: Arc<dyn LinkTagRepository>,
        timeout: Duration,
        alias_length: usize,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(link_repository, timeout, alias_length)),
            tag_service: Arc::new(TagService::new(tag_repository, timeout)),
            link_tag_service: Arc::new(LinkTagService::new(link_tag_repository, timeout)),
        }
    }

    /// Wires services over the PostgreSQL repositories.
    pub fn with_pool(pool: Arc<PgPool>, timeout: Duration, alias_length: usize) -> Self {
        Self::new(
            Arc::new(PgLinkRepository::new(pool.clone())),
            Arc::new(PgTagRepository::new(pool.clone())),
            Arc::new(PgLinkTagRepository::new(pool)),
            timeout,
            alias_length,
        )
    }
}
