//! Custom Axum extractors.

use axum::extract::{FromRequest, FromRequestParts, Json, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde_json::json;
use validator::Validate;

use crate::error::AppError;

/// JSON body that has been deserialized and validated.
///
/// Both malformed JSON and failed validation are reported as
/// [`AppError::Validation`] (422).
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            AppError::bad_request(
                "Given param is not valid",
                json!({ "body": rejection.body_text() }),
            )
        })?;

        value.validate()?;
        Ok(Self(value))
    }
}

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::not_found("Your requested item is not found", json!({ "id": raw })))
}

/// A positive integer id from a single-segment path like `/links/{id}`.
///
/// Anything that is not a positive integer cannot name a record, so it is
/// reported as [`AppError::NotFound`].
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::not_found("Your requested item is not found", json!({})))?;

        Ok(Self(parse_id(&raw)?))
    }
}

/// The `(link id, tag id)` pair from `/links/{id}/tags/{tag_id}`.
pub struct LinkTagPath {
    pub link_id: i64,
    pub tag_id: i64,
}

impl<S> FromRequestParts<S> for LinkTagPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((link_id, tag_id)): Path<(String, String)> =
            Path::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::not_found("Your requested item is not found", json!({})))?;

        Ok(Self {
            link_id: parse_id(&link_id)?,
            tag_id: parse_id(&tag_id)?,
        })
    }
}
