//! Handlers for tag endpoints and link tagging.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};

use crate::api::dto::envelope::Envelope;
use crate::api::dto::pagination::LimitParams;
use crate::api::dto::tag::{TagNameRequest, TagResponse, TagSummary};
use crate::api::extract::{IdPath, LinkTagPath, ValidatedJson};
use crate::error::AppError;
use crate::state::AppState;

/// Lists tags, oldest first.
///
/// # Endpoint
///
/// `GET /tags?limit=N`
pub async fn list_tags_handler(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<Json<Envelope<Vec<TagResponse>>>, AppError> {
    let tags = state.tag_service.fetch(params.limit).await?;
    Ok(Json(Envelope::ok(
        tags.into_iter().map(TagResponse::from).collect(),
    )))
}

/// `GET /tags/{id}`
pub async fn get_tag_handler(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Envelope<TagResponse>>, AppError> {
    let tag = state.tag_service.get_by_id(id).await?;
    Ok(Json(Envelope::ok(tag.into())))
}

/// Creates a tag.
///
/// # Endpoint
///
/// `POST /tags`
///
/// # Errors
///
/// Returns 409 if a tag with this name exists.
/// Returns 422 if the name is blank or too long.
pub async fn create_tag_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<TagNameRequest>,
) -> Result<(StatusCode, Json<Envelope<TagResponse>>), AppError> {
    let tag = state.tag_service.store(&payload.name).await?;
    Ok((StatusCode::CREATED, Json(Envelope::ok(tag.into()))))
}

/// Renames a tag.
///
/// # Endpoint
///
/// `PATCH /tags/{id}`
///
/// # Errors
///
/// Returns 404 if the tag does not exist.
/// Returns 409 if another tag already has the name.
pub async fn update_tag_handler(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<TagNameRequest>,
) -> Result<Json<Envelope<TagResponse>>, AppError> {
    let tag = state.tag_service.update(id, &payload.name).await?;
    Ok(Json(Envelope::ok(tag.into())))
}

/// Deletes a tag; its link associations go with it.
///
/// # Endpoint
///
/// `DELETE /tags/{id}`
pub async fn delete_tag_handler(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<StatusCode, AppError> {
    state.tag_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Lists the tags of an active link.
///
/// # Endpoint
///
/// `GET /links/{id}/tags`
pub async fn link_tags_handler(
    State(state): State<AppState>,
    IdPath(link_id): IdPath,
) -> Result<Json<Envelope<Vec<TagSummary>>>, AppError> {
    state.link_service.get_by_id(link_id).await?;
    let tags = state.tag_service.fetch_by_link_id(link_id).await?;

    Ok(Json(Envelope::ok(
        tags.into_iter().map(TagSummary::from).collect(),
    )))
}

/// Attaches a tag to a link, creating the tag if needed.
///
/// # Endpoint
///
/// `POST /links/{id}/tags`
///
/// # Errors
///
/// Returns 404 if the link does not exist or was deleted.
/// Returns 409 if the tag is already attached.
pub async fn attach_tag_handler(
    State(state): State<AppState>,
    IdPath(link_id): IdPath,
    ValidatedJson(payload): ValidatedJson<TagNameRequest>,
) -> Result<(StatusCode, Json<Envelope<TagSummary>>), AppError> {
    state.link_service.get_by_id(link_id).await?;

    let tag = state.tag_service.first_or_create(&payload.name).await?;
    state.link_tag_service.attach(link_id, tag.id).await?;

    tracing::info!(link_id, tag_id = tag.id, "Tag attached");
    Ok((StatusCode::CREATED, Json(Envelope::ok(tag.into()))))
}

/// Detaches a tag from a link.
///
/// # Endpoint
///
/// `DELETE /links/{id}/tags/{tag_id}`
///
/// # Errors
///
/// Returns 404 if the tag is not attached to the link.
pub async fn detach_tag_handler(
    State(state): State<AppState>,
    path: LinkTagPath,
) -> Result<StatusCode, AppError> {
    state
        .link_tag_service
        .detach(path.link_id, path.tag_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
