//! PostgreSQL implementation of link/tag association repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use super::expect_single_row;
use super::rows::LinkTagRow;
use crate::domain::entities::{LinkTag, NewLinkTag};
use crate::domain::repositories::LinkTagRepository;
use crate::error::AppError;

/// PostgreSQL repository for the `link_tags` join table.
pub struct PgLinkTagRepository {
    pool: Arc<PgPool>,
}

impl PgLinkTagRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn pair_conflict(e: sqlx::Error, link_id: i64, tag_id: i64) -> AppError {
    match AppError::from(e) {
        AppError::Conflict { .. } => AppError::conflict(
            "Your item already exist",
            json!({ "link_id": link_id, "tag_id": tag_id }),
        ),
        other => other,
    }
}

#[async_trait]
impl LinkTagRepository for PgLinkTagRepository {
    async fn fetch(&self, limit: i64) -> Result<Vec<LinkTag>, AppError> {
        let rows = sqlx::query_as::<_, LinkTagRow>(
            r#"
            SELECT id, link_id, tag_id, created_at, updated_at
            FROM link_tags
            ORDER BY created_at, id
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(LinkTag::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<LinkTag>, AppError> {
        let row = sqlx::query_as::<_, LinkTagRow>(
            "SELECT id, link_id, tag_id, created_at, updated_at FROM link_tags WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(LinkTag::from))
    }

    async fn find_pair(&self, link_id: i64, tag_id: i64) -> Result<Option<LinkTag>, AppError> {
        let row = sqlx::query_as::<_, LinkTagRow>(
            r#"
            SELECT id, link_id, tag_id, created_at, updated_at
            FROM link_tags
            WHERE link_id = $1 AND tag_id = $2
            "#,
        )
        .bind(link_id)
        .bind(tag_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(LinkTag::from))
    }

    async fn store(&self, new_link_tag: NewLinkTag) -> Result<i64, AppError> {
        sqlx::query_scalar("INSERT INTO link_tags (link_id, tag_id) VALUES ($1, $2) RETURNING id")
            .bind(new_link_tag.link_id)
            .bind(new_link_tag.tag_id)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| pair_conflict(e, new_link_tag.link_id, new_link_tag.tag_id))
    }

    async fn update(&self, link_tag: LinkTag) -> Result<i64, AppError> {
        let result = sqlx::query(
            "UPDATE link_tags SET link_id = $2, tag_id = $3, updated_at = $4 WHERE id = $1",
        )
        .bind(link_tag.id)
        .bind(link_tag.link_id)
        .bind(link_tag.tag_id)
        .bind(link_tag.updated_at)
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| pair_conflict(e, link_tag.link_id, link_tag.tag_id))?;

        expect_single_row(result.rows_affected(), "link_tags", link_tag.id)?;
        Ok(link_tag.id)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM link_tags WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        expect_single_row(result.rows_affected(), "link_tags", id)
    }
}
