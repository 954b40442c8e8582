//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! Every repository call made by a service runs under the configured per-call
//! deadline ([`deadline::with_deadline`]), and list operations clamp their
//! limit with [`pagination::clamp_limit`].
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Alias assignment, link lifecycle
//! - [`services::tag_service::TagService`] - Tag lookup and find-or-create
//! - [`services::link_tag_service::LinkTagService`] - Attaching and detaching tags

pub mod deadline;
pub mod pagination;
pub mod services;
