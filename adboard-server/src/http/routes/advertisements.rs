//! Advertisement endpoints
//!
//! Every handler opens exactly one store session first thing. The session
//! is committed after a successful write and dropped (rolled back if
//! uncommitted) when the handler returns, on every path.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

use crate::http::error::ApiError;
use crate::http::extractors::{json_body, AdvertisementId};
use crate::http::server::AppState;
use crate::models::{Advertisement, AdvertisementPatch, CreateAdvertisement};

/// Delete response
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub status: &'static str,
}

/// POST /advertisement - create a new advertisement
async fn create_advertisement(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Advertisement>, ApiError> {
    let mut session = state.store.session().await?;

    let payload = CreateAdvertisement::from_json(&json_body(body)?)?;
    let ad = session.insert(&payload).await?;
    session.commit().await?;

    tracing::info!(id = ad.id, "created advertisement");
    Ok(Json(ad))
}

/// GET /advertisement/{id} - fetch a single advertisement
async fn get_advertisement(
    State(state): State<Arc<AppState>>,
    AdvertisementId(id): AdvertisementId,
) -> Result<Json<Advertisement>, ApiError> {
    let mut session = state.store.session().await?;
    let ad = session.get_by_id(id).await?;
    Ok(Json(ad))
}

/// PATCH /advertisement/{id} - update only the supplied fields
async fn update_advertisement(
    State(state): State<Arc<AppState>>,
    AdvertisementId(id): AdvertisementId,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Advertisement>, ApiError> {
    let mut session = state.store.session().await?;

    let patch = AdvertisementPatch::from_json(&json_body(body)?)?;
    let mut ad = session.get_by_id(id).await?;
    patch.apply(&mut ad);
    let ad = session.update(&ad).await?;
    session.commit().await?;

    tracing::info!(id, "updated advertisement");
    Ok(Json(ad))
}

/// DELETE /advertisement/{id} - remove an advertisement
async fn delete_advertisement(
    State(state): State<Arc<AppState>>,
    AdvertisementId(id): AdvertisementId,
) -> Result<Json<DeletedResponse>, ApiError> {
    let mut session = state.store.session().await?;

    session.get_by_id(id).await?;
    session.delete(id).await?;
    session.commit().await?;

    tracing::info!(id, "deleted advertisement");
    Ok(Json(DeletedResponse { status: "deleted" }))
}

/// Advertisement routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/advertisement", post(create_advertisement))
        .route(
            "/advertisement/{id}",
            get(get_advertisement)
                .patch(update_advertisement)
                .delete(delete_advertisement),
        )
}
