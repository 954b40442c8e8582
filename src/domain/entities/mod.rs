//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Link`] - A shortened URL mapping
//! - [`Tag`] - A label that can be attached to links
//! - [`LinkTag`] - The association between a link and a tag
//! - [`analytics`] - Click analytics records (schema only)
//!
//! # Design Pattern
//!
//! Entities have separate structs for creation and partial updates:
//! - `NewLink`, `NewTag`, `NewLinkTag` - For creating new records
//! - `LinkPatch` - For partial link updates

pub mod analytics;
pub mod link;
pub mod link_tag;
pub mod tag;

pub use link::{Link, LinkPatch, NewLink};
pub use link_tag::{LinkTag, NewLinkTag};
pub use tag::{FailedTag, NewTag, Tag, TagAttachReport, normalize_tag_names};
