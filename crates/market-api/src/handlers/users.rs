//! User handlers

use axum::{extract::State, Json};
use market_service::dto::UserResponse;
use market_service::AuthService;

use crate::extractors::AuthUser;
use crate::response::{ApiResult, ErrorBody};
use crate::state::AppState;

/// Get current user
///
/// GET /api/user/
#[utoipa::path(
    get,
    path = "/api/user/",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Authenticated user", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
    )
)]
pub async fn current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.current_user(auth.user_id).await?;
    Ok(Json(response))
}

/// Get current user, admins only
///
/// GET /api/admin-user/
#[utoipa::path(
    get,
    path = "/api/admin-user/",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Authenticated administrator", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Not an administrator", body = ErrorBody),
    )
)]
pub async fn admin_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.admin_user(auth.user_id).await?;
    Ok(Json(response))
}
