//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern. The
//! services in [`crate::application`] depend only on them, so the storage
//! engine can be swapped without touching business rules.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Short link CRUD and the create-with-tags unit of work
//! - [`TagRepository`] - Tag CRUD and atomic find-or-create
//! - [`LinkTagRepository`] - Link/tag associations
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod link_repository;
pub mod link_tag_repository;
pub mod tag_repository;

pub use link_repository::LinkRepository;
pub use link_tag_repository::LinkTagRepository;
pub use tag_repository::TagRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use link_tag_repository::MockLinkTagRepository;
#[cfg(test)]
pub use tag_repository::MockTagRepository;
