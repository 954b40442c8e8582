//! HTTP delivery: request shapes, extractors, handlers and the resource router.
//!
//! Handlers stay thin. They decode and validate input, call one or two
//! services from [`crate::state::AppState`], and wrap the result in
//! [`dto::envelope::Envelope`]. Failures are [`crate::error::AppError`] values
//! rendered by its `IntoResponse` impl.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
