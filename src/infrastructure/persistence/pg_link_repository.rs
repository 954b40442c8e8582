//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::{Connection, PgConnection, PgPool};
use std::sync::Arc;

use super::expect_single_row;
use super::pg_tag_repository::upsert_tag;
use super::rows::LinkRow;
use crate::domain::entities::{FailedTag, Link, NewLink, TagAttachReport};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for link storage and retrieval.
///
/// Alias uniqueness is enforced by the partial index `links_alias_active_key`,
/// which only covers rows with `deleted_at IS NULL`.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Rewrites a unique violation on insert/update into an alias conflict.
fn alias_conflict(e: sqlx::Error, alias: &str) -> AppError {
    match AppError::from(e) {
        AppError::Conflict { .. } => {
            AppError::conflict("Link is exists", json!({ "alias": alias }))
        }
        other => other,
    }
}

async fn insert_link(conn: &mut PgConnection, new_link: &NewLink) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO links (user_id, alias, target, description)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(new_link.user_id)
    .bind(&new_link.alias)
    .bind(&new_link.target)
    .bind(&new_link.description)
    .fetch_one(conn)
    .await
}

/// Finds-or-creates the tag and associates it with the link.
async fn attach_tag(conn: &mut PgConnection, link_id: i64, name: &str) -> Result<i64, sqlx::Error> {
    let tag_id = upsert_tag(&mut *conn, name).await?;

    sqlx::query("INSERT INTO link_tags (link_id, tag_id) VALUES ($1, $2)")
        .bind(link_id)
        .bind(tag_id)
        .execute(&mut *conn)
        .await?;

    Ok(tag_id)
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn fetch(&self, limit: i64) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, user_id, alias, target, description, created_at, updated_at, deleted_at
            FROM links
            WHERE deleted_at IS NULL
            ORDER BY created_at, id
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        // Does NOT filter deleted_at; services decide how to treat deleted links.
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, user_id, alias, target, description, created_at, updated_at, deleted_at
            FROM links
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn get_by_alias(&self, alias: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, user_id, alias, target, description, created_at, updated_at, deleted_at
            FROM links
            WHERE alias = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(alias)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn store(&self, new_link: NewLink) -> Result<i64, AppError> {
        let mut conn = self.pool.acquire().await?;

        insert_link(&mut conn, &new_link)
            .await
            .map_err(|e| alias_conflict(e, &new_link.alias))
    }

    async fn store_with_tags(
        &self,
        new_link: NewLink,
        tag_names: Vec<String>,
    ) -> Result<(i64, TagAttachReport), AppError> {
        let mut tx = self.pool.begin().await?;

        let link_id = match insert_link(&mut tx, &new_link).await {
            Ok(id) => id,
            Err(e) => {
                tx.rollback().await?;
                return Err(alias_conflict(e, &new_link.alias));
            }
        };

        let mut report = TagAttachReport::default();

        for name in tag_names {
            // A failed statement aborts the enclosing transaction in PostgreSQL,
            // so each tag gets its own savepoint.
            let mut savepoint = Connection::begin(&mut *tx).await?;

            match attach_tag(&mut savepoint, link_id, &name).await {
                Ok(_) => {
                    savepoint.commit().await?;
                    report.attached.push(name);
                }
                Err(e) => {
                    savepoint.rollback().await?;
                    let error = AppError::from(e).to_error_info();
                    tracing::warn!(link_id, tag = %name, error = %error.message, "Failed to attach tag");
                    report.failed.push(FailedTag { name, error });
                }
            }
        }

        if !report.is_complete() {
            tx.rollback().await?;
            return Err(AppError::internal(
                "Failed to attach tags, link was not created",
                json!({ "tags": report }),
            ));
        }

        tx.commit().await?;
        Ok((link_id, report))
    }

    async fn update(&self, link: Link) -> Result<i64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE links SET
                user_id     = $2,
                alias       = $3,
                target      = $4,
                description = $5,
                updated_at  = $6,
                deleted_at  = $7
            WHERE id = $1
            "#,
        )
        .bind(link.id)
        .bind(link.user_id)
        .bind(&link.alias)
        .bind(&link.target)
        .bind(&link.description)
        .bind(link.updated_at)
        .bind(link.deleted_at)
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| alias_conflict(e, &link.alias))?;

        expect_single_row(result.rows_affected(), "links", link.id)?;
        Ok(link.id)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE links SET deleted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;

        expect_single_row(result.rows_affected(), "links", id)
    }
}
