//! Links, tags and their associations, plus the storage contracts the
//! services are written against.
//!
//! Nothing here knows about HTTP or PostgreSQL.

pub mod entities;
pub mod repositories;
