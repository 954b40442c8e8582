#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use serde_json::json;
use short_link::domain::entities::{
    FailedTag, Link, LinkTag, NewLink, NewLinkTag, NewTag, Tag, TagAttachReport,
};
use short_link::domain::repositories::{LinkRepository, LinkTagRepository, TagRepository};
use short_link::error::AppError;
use short_link::state::AppState;

pub const TEST_TIMEOUT: Duration = Duration::from_secs(2);
pub const TEST_ALIAS_LENGTH: usize = 8;

#[derive(Debug, Clone, Default)]
struct Store {
    links: Vec<Link>,
    tags: Vec<Tag>,
    link_tags: Vec<LinkTag>,
    next_id: i64,
    failing_tags: HashSet<String>,
    unavailable: bool,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn check(&self) -> Result<(), AppError> {
        if self.unavailable {
            return Err(AppError::internal("Internal Server Error", json!(null)));
        }
        Ok(())
    }

    fn alias_taken(&self, alias: &str, except: Option<i64>) -> bool {
        self.links
            .iter()
            .any(|l| l.alias == alias && !l.is_deleted() && Some(l.id) != except)
    }

    fn insert_link(&mut self, new_link: NewLink) -> Result<i64, AppError> {
        if self.alias_taken(&new_link.alias, None) {
            return Err(AppError::conflict(
                "Link is exists",
                json!({ "alias": new_link.alias }),
            ));
        }

        let id = self.next_id();
        let now = Utc::now();
        self.links.push(Link::new(
            id,
            new_link.user_id,
            new_link.alias,
            new_link.target,
            new_link.description,
            now,
            now,
            None,
        ));
        Ok(id)
    }

    fn first_or_create(&mut self, name: &str) -> i64 {
        if let Some(tag) = self.tags.iter().find(|t| t.name == name) {
            return tag.id;
        }
        let id = self.next_id();
        let now = Utc::now();
        self.tags.push(Tag::new(id, name.to_string(), now, now));
        id
    }

    fn insert_link_tag(&mut self, pair: NewLinkTag) -> Result<i64, AppError> {
        if self
            .link_tags
            .iter()
            .any(|lt| lt.link_id == pair.link_id && lt.tag_id == pair.tag_id)
        {
            return Err(AppError::conflict(
                "Your item already exist",
                json!({ "link_id": pair.link_id, "tag_id": pair.tag_id }),
            ));
        }
        let id = self.next_id();
        let now = Utc::now();
        self.link_tags
            .push(LinkTag::new(id, pair.link_id, pair.tag_id, now, now));
        Ok(id)
    }
}

/// Shared in-memory backing for all three repository traits.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<Store>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes attaching `name` fail inside `store_with_tags`.
    pub fn fail_tag(&self, name: &str) {
        self.inner.lock().unwrap().failing_tags.insert(name.to_string());
    }

    /// Makes every call return an internal error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.lock().unwrap().unavailable = unavailable;
    }

    pub fn link_count(&self) -> usize {
        self.inner.lock().unwrap().links.len()
    }

    pub fn tag_count(&self) -> usize {
        self.inner.lock().unwrap().tags.len()
    }

    pub fn link_tag_count(&self) -> usize {
        self.inner.lock().unwrap().link_tags.len()
    }

    pub fn raw_link(&self, id: i64) -> Option<Link> {
        self.inner
            .lock()
            .unwrap()
            .links
            .iter()
            .find(|l| l.id == id)
            .cloned()
    }
}

#[async_trait]
impl LinkRepository for InMemoryStore {
    async fn fetch(&self, limit: i64) -> Result<Vec<Link>, AppError> {
        let store = self.inner.lock().unwrap();
        store.check()?;
        Ok(store
            .links
            .iter()
            .filter(|l| !l.is_deleted())
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let store = self.inner.lock().unwrap();
        store.check()?;
        Ok(store.links.iter().find(|l| l.id == id).cloned())
    }

    async fn get_by_alias(&self, alias: &str) -> Result<Option<Link>, AppError> {
        let store = self.inner.lock().unwrap();
        store.check()?;
        Ok(store
            .links
            .iter()
            .find(|l| l.alias == alias && !l.is_deleted())
            .cloned())
    }

    async fn store(&self, new_link: NewLink) -> Result<i64, AppError> {
        let mut store = self.inner.lock().unwrap();
        store.check()?;
        store.insert_link(new_link)
    }

    async fn store_with_tags(
        &self,
        new_link: NewLink,
        tag_names: Vec<String>,
    ) -> Result<(i64, TagAttachReport), AppError> {
        let mut store = self.inner.lock().unwrap();
        store.check()?;

        // Work on a copy so a failed unit leaves nothing behind.
        let mut tx = store.clone();
        let link_id = tx.insert_link(new_link)?;
        let mut report = TagAttachReport::default();

        for name in tag_names {
            if tx.failing_tags.contains(&name) {
                let error = AppError::internal("Internal Server Error", json!(null)).to_error_info();
                report.failed.push(FailedTag { name, error });
                continue;
            }
            let tag_id = tx.first_or_create(&name);
            tx.insert_link_tag(NewLinkTag { link_id, tag_id })?;
            report.attached.push(name);
        }

        if !report.is_complete() {
            return Err(AppError::internal(
                "Failed to attach tags, link was not created",
                json!({ "tags": report }),
            ));
        }

        *store = tx;
        Ok((link_id, report))
    }

    async fn update(&self, link: Link) -> Result<i64, AppError> {
        let mut store = self.inner.lock().unwrap();
        store.check()?;
        if !link.is_deleted() && store.alias_taken(&link.alias, Some(link.id)) {
            return Err(AppError::conflict(
                "Link is exists",
                json!({ "alias": link.alias }),
            ));
        }
        let slot = store
            .links
            .iter_mut()
            .find(|l| l.id == link.id)
            .ok_or_else(|| AppError::internal("Internal Server Error", json!(null)))?;
        let id = link.id;
        *slot = link;
        Ok(id)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut store = self.inner.lock().unwrap();
        store.check()?;
        let link = store
            .links
            .iter_mut()
            .find(|l| l.id == id && !l.is_deleted())
            .ok_or_else(|| AppError::internal("Internal Server Error", json!(null)))?;
        link.deleted_at = Some(Utc::now());
        Ok(())
    }
}

#[async_trait]
impl TagRepository for InMemoryStore {
    async fn fetch(&self, limit: i64) -> Result<Vec<Tag>, AppError> {
        let store = self.inner.lock().unwrap();
        store.check()?;
        Ok(store.tags.iter().take(limit as usize).cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Tag>, AppError> {
        let store = self.inner.lock().unwrap();
        store.check()?;
        Ok(store.tags.iter().find(|t| t.id == id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Tag>, AppError> {
        let store = self.inner.lock().unwrap();
        store.check()?;
        Ok(store.tags.iter().find(|t| t.name == name).cloned())
    }

    async fn fetch_by_link_id(&self, link_id: i64) -> Result<Vec<Tag>, AppError> {
        let store = self.inner.lock().unwrap();
        store.check()?;
        Ok(store
            .tags
            .iter()
            .filter(|t| {
                store
                    .link_tags
                    .iter()
                    .any(|lt| lt.link_id == link_id && lt.tag_id == t.id)
            })
            .cloned()
            .collect())
    }

    async fn store(&self, new_tag: NewTag) -> Result<i64, AppError> {
        let mut store = self.inner.lock().unwrap();
        store.check()?;
        if store.tags.iter().any(|t| t.name == new_tag.name) {
            return Err(AppError::conflict(
                "Your item already exist",
                json!({ "name": new_tag.name }),
            ));
        }
        Ok(store.first_or_create(&new_tag.name))
    }

    async fn first_or_create(&self, name: &str) -> Result<i64, AppError> {
        let mut store = self.inner.lock().unwrap();
        store.check()?;
        Ok(store.first_or_create(name))
    }

    async fn update(&self, tag: Tag) -> Result<i64, AppError> {
        let mut store = self.inner.lock().unwrap();
        store.check()?;
        if store.tags.iter().any(|t| t.name == tag.name && t.id != tag.id) {
            return Err(AppError::conflict(
                "Your item already exist",
                json!({ "name": tag.name }),
            ));
        }
        let slot = store
            .tags
            .iter_mut()
            .find(|t| t.id == tag.id)
            .ok_or_else(|| AppError::internal("Internal Server Error", json!(null)))?;
        let id = tag.id;
        *slot = tag;
        Ok(id)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut store = self.inner.lock().unwrap();
        store.check()?;
        let before = store.tags.len();
        store.tags.retain(|t| t.id != id);
        if store.tags.len() == before {
            return Err(AppError::internal("Internal Server Error", json!(null)));
        }
        store.link_tags.retain(|lt| lt.tag_id != id);
        Ok(())
    }
}

#[async_trait]
impl LinkTagRepository for InMemoryStore {
    async fn fetch(&self, limit: i64) -> Result<Vec<LinkTag>, AppError> {
        let store = self.inner.lock().unwrap();
        store.check()?;
        Ok(store.link_tags.iter().take(limit as usize).cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<LinkTag>, AppError> {
        let store = self.inner.lock().unwrap();
        store.check()?;
        Ok(store.link_tags.iter().find(|lt| lt.id == id).cloned())
    }

    async fn find_pair(&self, link_id: i64, tag_id: i64) -> Result<Option<LinkTag>, AppError> {
        let store = self.inner.lock().unwrap();
        store.check()?;
        Ok(store
            .link_tags
            .iter()
            .find(|lt| lt.link_id == link_id && lt.tag_id == tag_id)
            .cloned())
    }

    async fn store(&self, new_link_tag: NewLinkTag) -> Result<i64, AppError> {
        let mut store = self.inner.lock().unwrap();
        store.check()?;
        store.insert_link_tag(new_link_tag)
    }

    async fn update(&self, link_tag: LinkTag) -> Result<i64, AppError> {
        let mut store = self.inner.lock().unwrap();
        store.check()?;
        let slot = store
            .link_tags
            .iter_mut()
            .find(|lt| lt.id == link_tag.id)
            .ok_or_else(|| AppError::internal("Internal Server Error", json!(null)))?;
        let id = link_tag.id;
        *slot = link_tag;
        Ok(id)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut store = self.inner.lock().unwrap();
        store.check()?;
        let before = store.link_tags.len();
        store.link_tags.retain(|lt| lt.id != id);
        if store.link_tags.len() == before {
            return Err(AppError::internal("Internal Server Error", json!(null)));
        }
        Ok(())
    }
}

pub fn create_test_state(store: &InMemoryStore) -> AppState {
    AppState::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        TEST_TIMEOUT,
        TEST_ALIAS_LENGTH,
    )
}

/// Full application router over `store`.
pub fn create_test_server(store: &InMemoryStore) -> TestServer {
    let app = short_link::routes::router(create_test_state(store));
    TestServer::new(app).unwrap()
}
