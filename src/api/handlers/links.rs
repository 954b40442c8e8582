//! Handlers for link endpoints.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};

use crate::api::dto::envelope::Envelope;
use crate::api::dto::link::{CreateLinkRequest, CreateLinkResponse, LinkResponse, UpdateLinkRequest};
use crate::api::dto::pagination::LimitParams;
use crate::api::extract::{IdPath, ValidatedJson};
use crate::domain::entities::Link;
use crate::error::AppError;
use crate::state::AppState;

/// Loads the tags of `link` and builds its response.
async fn enrich(state: &AppState, link: Link) -> Result<LinkResponse, AppError> {
    let tags = state.tag_service.fetch_by_link_id(link.id).await?;
    Ok(LinkResponse::new(link, tags))
}

/// Lists active links with their tags, oldest first.
///
/// # Endpoint
///
/// `GET /links?limit=N`
///
/// `limit` defaults to 10 and is capped at 100.
pub async fn list_links_handler(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<Json<Envelope<Vec<LinkResponse>>>, AppError> {
    let links = state.link_service.fetch(params.limit).await?;

    let mut items = Vec::with_capacity(links.len());
    for link in links {
        items.push(enrich(&state, link).await?);
    }

    Ok(Json(Envelope::ok(items)))
}

/// Returns one active link.
///
/// # Endpoint
///
/// `GET /links/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the link does not exist or was deleted.
pub async fn get_link_handler(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Envelope<LinkResponse>>, AppError> {
    let link = state.link_service.get_by_id(id).await?;
    Ok(Json(Envelope::ok(enrich(&state, link).await?)))
}

/// Creates a link and attaches its tags in one transaction.
///
/// # Endpoint
///
/// `POST /links`
///
/// # Request Body
///
/// ```json
/// {
///   "target": "https://example.com",
///   "alias": "promo",          // optional
///   "length": 6,               // optional, 3-10, used when alias is absent
///   "description": "Spring",   // optional, up to 512 chars
///   "tags": ["news", "promo"]  // optional
/// }
/// ```
///
/// # Response
///
/// `201 Created` with the link, its tags and a `tag_report`.
///
/// # Errors
///
/// Returns 422 if validation fails.
/// Returns 409 if the alias is taken.
/// Returns 500 with the per-tag report in `details` if any tag failed; the
/// link is not created in that case.
pub async fn create_link_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateLinkRequest>,
) -> Result<(StatusCode, Json<Envelope<CreateLinkResponse>>), AppError> {
    let (id, tag_report) = state
        .link_service
        .create_with_tags(payload.into_input())
        .await?;

    let link = state.link_service.get_by_id(id).await?;
    tracing::info!(link_id = id, alias = %link.alias, tags = tag_report.attached.len(), "Link created");

    let response = CreateLinkResponse {
        link: enrich(&state, link).await?,
        tag_report,
    };

    Ok((StatusCode::CREATED, Json(Envelope::ok(response))))
}

/// Partially updates a link.
///
/// # Endpoint
///
/// `PATCH /links/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the link does not exist or was deleted.
/// Returns 409 if the new alias is taken.
/// Returns 422 if validation fails.
pub async fn update_link_handler(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<UpdateLinkRequest>,
) -> Result<Json<Envelope<LinkResponse>>, AppError> {
    let link = state.link_service.update(id, payload.into_patch()).await?;
    Ok(Json(Envelope::ok(enrich(&state, link).await?)))
}

/// Soft-deletes a link.
///
/// # Endpoint
///
/// `DELETE /links/{id}`
///
/// The alias stops resolving immediately and becomes free for new links.
///
/// # Errors
///
/// Returns 404 Not Found if the link does not exist or is already deleted.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<StatusCode, AppError> {
    state.link_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
