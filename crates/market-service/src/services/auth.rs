//! Authentication service
//!
//! Handles registration, token issue, token refresh and profile lookups.

use market_common::auth::{hash_password, validate_password_strength, verify_password};
use market_common::AppError;
use market_core::entities::{NewUser, User};
use market_core::error::DomainError;
use market_core::value_objects::UserId;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{
    MessageResponse, RefreshTokenRequest, RegisterRequest, TokenRequest, TokenResponse,
    UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<MessageResponse> {
        validate_password_strength(&request.password, &request.username).map_err(|e| match e {
            AppError::Validation(msg) => ServiceError::field("password", msg),
            other => ServiceError::from(other),
        })?;

        let new_user = NewUser::new(request.username, &request.email);

        if self.ctx.user_repo().username_exists(&new_user.username).await? {
            return Err(DomainError::UsernameAlreadyExists.into());
        }
        if self.ctx.user_repo().email_exists(&new_user.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = hash_password(&request.password)?;

        // The unique constraints still catch a concurrent registration
        let user = self.ctx.user_repo().create(&new_user, &password_hash).await?;

        info!(user_id = %user.id, "User registered successfully");

        Ok(MessageResponse::new("User registered successfully"))
    }

    /// Exchange username and password for a token pair
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn obtain_token(&self, request: TokenRequest) -> ServiceResult<TokenResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        let tokens = self.start_session(&user).await?;

        info!(user_id = %user.id, "User logged in successfully");

        Ok(tokens)
    }

    /// Rotate a refresh token: the presented session is consumed and a new
    /// pair is issued for a fresh session
    #[instrument(skip(self, request))]
    pub async fn refresh(&self, request: RefreshTokenRequest) -> ServiceResult<TokenResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)?;
        let user_id = claims.user_id()?;

        let owner = self.ctx.session_store().consume(&claims.session_id).await?;
        if owner != Some(user_id) {
            warn!(user_id = %user_id, "Refresh rejected: session revoked or reused");
            return Err(ServiceError::App(AppError::InvalidToken));
        }

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        let tokens = self.start_session(&user).await?;

        info!(user_id = %user.id, "Tokens refreshed successfully");

        Ok(tokens)
    }

    /// Profile of the authenticated user
    #[instrument(skip(self))]
    pub async fn current_user(&self, user_id: UserId) -> ServiceResult<UserResponse> {
        let user = self.load_user(user_id).await?;
        Ok(UserResponse::from(&user))
    }

    /// Profile of the authenticated user, who must be an administrator
    #[instrument(skip(self))]
    pub async fn admin_user(&self, user_id: UserId) -> ServiceResult<UserResponse> {
        let user = self.load_user(user_id).await?;
        if !user.is_admin() {
            warn!(user_id = %user_id, "Admin access denied");
            return Err(ServiceError::forbidden(
                "You do not have permission to perform this action.",
            ));
        }
        Ok(UserResponse::from(&user))
    }

    /// A token for a deleted account is no longer valid
    async fn load_user(&self, user_id: UserId) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))
    }

    async fn start_session(&self, user: &User) -> ServiceResult<TokenResponse> {
        let session_id = Uuid::new_v4().to_string();
        let jwt = self.ctx.jwt_service();

        let pair = jwt.issue_pair(user.id, &user.username, &session_id)?;

        let ttl = u64::try_from(jwt.refresh_token_expiry()).unwrap_or_default();
        self.ctx
            .session_store()
            .create(&session_id, user.id, ttl)
            .await?;

        Ok(TokenResponse::from(pair))
    }
}
