//! Bearer-token authentication
//!
//! Handlers that take an [`AuthUser`] only run for requests carrying a valid
//! access token. Refresh tokens are refused by their `token_type` claim.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use market_common::Claims;
use market_core::UserId;

use crate::response::ApiError;
use crate::state::AppState;

/// Caller identity taken from a verified access token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub username: String,
}

impl TryFrom<Claims> for AuthUser {
    type Error = ApiError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let user_id = claims.user_id().map_err(|_| {
            tracing::warn!(sub = %claims.sub, "Token subject is not a user id");
            ApiError::InvalidToken
        })?;

        Ok(Self {
            user_id,
            username: claims.username,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(TypedHeader(Authorization(bearer))) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await
        else {
            return Err(ApiError::MissingAuth);
        };

        let claims = AppState::from_ref(state)
            .jwt_service()
            .validate_access_token(bearer.token())
            .inspect_err(|e| tracing::debug!(error = %e, "Access token refused"))?;

        Self::try_from(claims)
    }
}
