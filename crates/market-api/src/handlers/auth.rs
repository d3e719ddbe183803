//! Authentication handlers
//!
//! Endpoints for user registration, token issue, and token refresh.

use axum::{extract::State, Json};
use market_service::dto::{
    MessageResponse, RefreshTokenRequest, RegisterRequest, TokenRequest, TokenResponse,
};
use market_service::AuthService;

use crate::extractors::ValidatedJson;
use crate::response::{ApiResult, Created, ErrorBody};
use crate::state::AppState;

/// Register a new user
///
/// POST /api/register/
#[utoipa::path(
    post,
    path = "/api/register/",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = MessageResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 409, description = "Username or email taken", body = ErrorBody),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// Obtain an access/refresh token pair
///
/// POST /api/token/
#[utoipa::path(
    post,
    path = "/api/token/",
    tag = "auth",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token pair", body = TokenResponse),
        (status = 401, description = "Bad credentials", body = ErrorBody),
    )
)]
pub async fn obtain_token(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TokenRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.obtain_token(request).await?;
    Ok(Json(response))
}

/// Rotate a refresh token
///
/// POST /api/token/refresh/
#[utoipa::path(
    post,
    path = "/api/token/refresh/",
    tag = "auth",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "New token pair", body = TokenResponse),
        (status = 401, description = "Refresh token invalid or revoked", body = ErrorBody),
    )
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RefreshTokenRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.refresh(request).await?;
    Ok(Json(response))
}
