//! JWT utilities for authentication
//!
//! Provides token encoding, decoding, and validation using the `jsonwebtoken` crate.
//! Every pair is bound to a session id; the refresh side of that session is
//! tracked in Redis so a refresh token can be used exactly once.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use market_core::UserId;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Token type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Username at issue time, for log context only
    pub username: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Unique token id
    pub jti: String,
    /// Token type (access or refresh)
    pub token_type: TokenType,
    /// Login session the token belongs to
    pub session_id: String,
}

impl Claims {
    /// Get the user ID
    ///
    /// # Errors
    /// Returns an error if the subject is not a valid id
    pub fn user_id(&self) -> Result<UserId, AppError> {
        UserId::parse(&self.sub).map_err(|_| AppError::InvalidToken)
    }
}

/// Token pair containing access and refresh tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// JWT service for encoding and decoding tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

impl JwtService {
    /// Create a new JWT service with the given secret and expiry times (seconds)
    #[must_use]
    pub fn new(secret: &str, access_token_expiry: i64, refresh_token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry,
            refresh_token_expiry,
        }
    }

    /// Refresh token lifetime in seconds
    #[must_use]
    pub fn refresh_token_expiry(&self) -> i64 {
        self.refresh_token_expiry
    }

    /// Issue an access/refresh pair for a login session
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_pair(
        &self,
        user_id: UserId,
        username: &str,
        session_id: &str,
    ) -> Result<TokenPair, AppError> {
        let access_token = self.encode_token(user_id, username, TokenType::Access, session_id)?;
        let refresh_token = self.encode_token(user_id, username, TokenType::Refresh, session_id)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    fn encode_token(
        &self,
        user_id: UserId,
        username: &str,
        token_type: TokenType,
        session_id: &str,
    ) -> Result<String, AppError> {
        let lifetime = match token_type {
            TokenType::Access => self.access_token_expiry,
            TokenType::Refresh => self.refresh_token_expiry,
        };
        let issued_at = Utc::now();

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_owned(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::seconds(lifetime)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
            token_type,
            session_id: session_id.to_owned(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(anyhow::anyhow!("JWT encoding failed: {e}")))
    }

    /// Verify signature and expiry, then require the given token type
    fn decode_as(&self, token: &str, expected: TokenType) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })?;

        if claims.token_type == expected {
            Ok(claims)
        } else {
            Err(AppError::InvalidToken)
        }
    }

    /// Claims of a valid, unexpired access token
    ///
    /// # Errors
    /// `TokenExpired`, or `InvalidToken` for anything else including refresh tokens
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_as(token, TokenType::Access)
    }

    /// Claims of a valid, unexpired refresh token
    ///
    /// # Errors
    /// `TokenExpired`, or `InvalidToken` for anything else including access tokens
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_as(token, TokenType::Refresh)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish_non_exhaustive()
    }
}
