//! Custom Axum extractors

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use axum::Json;
use serde_json::Value;

use super::error::ApiError;
use crate::models::ValidationError;

/// Extract an advertisement id from the path.
///
/// Anything that is not an integer cannot name a record, so it is reported
/// as not found rather than as a validation failure.
pub struct AdvertisementId(pub i64);

impl<S> FromRequestParts<S> for AdvertisementId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<i64> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound)?;

        Ok(Self(id))
    }
}

/// Turn a JSON body extraction result into a value, a 415 when the request
/// is not `application/json`, or a 400 for anything unparsable.
///
/// Handlers take `Result<Json<Value>, JsonRejection>` so the session is
/// opened before the body is looked at.
pub fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(JsonRejection::MissingJsonContentType(_)) => Err(ApiError::UnsupportedMediaType),
        Err(rejection) => Err(ApiError::Validation(ValidationError::MalformedBody {
            reason: rejection.body_text(),
        })),
    }
}
