//! Business logic services for the application layer.

pub mod link_service;
pub mod link_tag_service;
pub mod tag_service;

pub use link_service::{CreateLink, LinkService};
pub use link_tag_service::LinkTagService;
pub use tag_service::TagService;
