//! PostgreSQL implementation of tag repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::{PgConnection, PgPool};
use std::sync::Arc;

use super::expect_single_row;
use super::rows::TagRow;
use crate::domain::entities::{NewTag, Tag};
use crate::domain::repositories::TagRepository;
use crate::error::AppError;

/// PostgreSQL repository for tags.
pub struct PgTagRepository {
    pool: Arc<PgPool>,
}

impl PgTagRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Inserts the tag or returns the id of the existing one in a single statement.
///
/// `DO UPDATE` makes `RETURNING` yield the existing row on conflict, so
/// concurrent callers with the same name get the same id.
pub(crate) async fn upsert_tag(conn: &mut PgConnection, name: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO tags (name)
        VALUES ($1)
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(name)
    .fetch_one(conn)
    .await
}

fn name_conflict(e: sqlx::Error, name: &str) -> AppError {
    match AppError::from(e) {
        AppError::Conflict { .. } => {
            AppError::conflict("Your item already exist", json!({ "name": name }))
        }
        other => other,
    }
}

#[async_trait]
impl TagRepository for PgTagRepository {
    async fn fetch(&self, limit: i64) -> Result<Vec<Tag>, AppError> {
        let rows = sqlx::query_as::<_, TagRow>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM tags
            ORDER BY created_at, id
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Tag::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Tag>, AppError> {
        let row = sqlx::query_as::<_, TagRow>(
            "SELECT id, name, created_at, updated_at FROM tags WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Tag::from))
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Tag>, AppError> {
        let row = sqlx::query_as::<_, TagRow>(
            "SELECT id, name, created_at, updated_at FROM tags WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Tag::from))
    }

    async fn fetch_by_link_id(&self, link_id: i64) -> Result<Vec<Tag>, AppError> {
        let rows = sqlx::query_as::<_, TagRow>(
            r#"
            SELECT t.id, t.name, t.created_at, t.updated_at
            FROM tags t
            INNER JOIN link_tags lt ON lt.tag_id = t.id
            WHERE lt.link_id = $1
            ORDER BY t.created_at, t.id
            "#,
        )
        .bind(link_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Tag::from).collect())
    }

    async fn store(&self, new_tag: NewTag) -> Result<i64, AppError> {
        sqlx::query_scalar("INSERT INTO tags (name) VALUES ($1) RETURNING id")
            .bind(&new_tag.name)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| name_conflict(e, &new_tag.name))
    }

    async fn first_or_create(&self, name: &str) -> Result<i64, AppError> {
        let mut conn = self.pool.acquire().await?;
        Ok(upsert_tag(&mut conn, name).await?)
    }

    async fn update(&self, tag: Tag) -> Result<i64, AppError> {
        let result = sqlx::query("UPDATE tags SET name = $2, updated_at = $3 WHERE id = $1")
            .bind(tag.id)
            .bind(&tag.name)
            .bind(tag.updated_at)
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| name_conflict(e, &tag.name))?;

        expect_single_row(result.rows_affected(), "tags", tag.id)?;
        Ok(tag.id)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        expect_single_row(result.rows_affected(), "tags", id)
    }
}
