//! Photo reaction handlers
//!
//! `GET` reports the caller's current reaction; `POST` toggles it and
//! returns the fresh counts.

use axum::{extract::State, Json};
use market_core::PhotoId;
use market_service::dto::{ReactionRequest, ReactionResponse, ReactionStateResponse};
use market_service::ReactionService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, ErrorBody};
use crate::state::AppState;

/// Get the caller's reaction on a photo
///
/// GET /api/photos/{id}/like/
#[utoipa::path(
    get,
    path = "/api/photos/{id}/like/",
    tag = "photos",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Photo id")),
    responses(
        (status = 200, description = "Current reaction; null when none", body = ReactionStateResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "Photo not found", body = ErrorBody),
    )
)]
pub async fn get_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(photo_id): IdPath<PhotoId>,
) -> ApiResult<Json<ReactionStateResponse>> {
    let service = ReactionService::new(state.service_context());
    Ok(Json(service.get_state(auth.user_id, photo_id).await?))
}

/// Like or dislike a photo; repeating the same action clears it
///
/// POST /api/photos/{id}/like/
#[utoipa::path(
    post,
    path = "/api/photos/{id}/like/",
    tag = "photos",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Photo id")),
    request_body = ReactionRequest,
    responses(
        (status = 200, description = "New state with counts", body = ReactionResponse),
        (status = 400, description = "Unknown action", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "Photo not found", body = ErrorBody),
    )
)]
pub async fn toggle_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(photo_id): IdPath<PhotoId>,
    ValidatedJson(request): ValidatedJson<ReactionRequest>,
) -> ApiResult<Json<ReactionResponse>> {
    let service = ReactionService::new(state.service_context());
    Ok(Json(
        service
            .apply_action(auth.user_id, photo_id, request.action)
            .await?,
    ))
}
