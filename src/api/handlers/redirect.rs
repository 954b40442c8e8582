//! Handler for alias redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects an alias to its target.
///
/// # Endpoint
///
/// `GET /{alias}`
///
/// # Response
///
/// `301 Moved Permanently` with `Location` set to the stored target, unchanged.
///
/// # Errors
///
/// Returns 404 Not Found if no active link uses the alias.
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.link_service.get_by_alias(&alias).await?;

    tracing::debug!(alias = %alias, link_id = link.id, "Redirecting");
    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, link.target)]))
}
