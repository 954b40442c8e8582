//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with bound
//! parameters. Rows are decoded into private `FromRow` structs and converted to
//! domain entities so the domain layer stays free of driver types.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage, alias lookup, create-with-tags unit of work
//! - [`PgTagRepository`] - Tag storage and atomic find-or-create
//! - [`PgLinkTagRepository`] - Link/tag associations

pub mod pg_link_repository;
pub mod pg_link_tag_repository;
pub mod pg_tag_repository;
mod rows;

pub use pg_link_repository::PgLinkRepository;
pub use pg_link_tag_repository::PgLinkTagRepository;
pub use pg_tag_repository::PgTagRepository;

use crate::error::AppError;
use serde_json::json;

/// Fails unless a write statement touched exactly one row.
pub(crate) fn expect_single_row(affected: u64, table: &'static str, id: i64) -> Result<(), AppError> {
    if affected != 1 {
        return Err(AppError::internal(
            format!("Total affected: {}", affected),
            json!({ "table": table, "id": id }),
        ));
    }
    Ok(())
}
