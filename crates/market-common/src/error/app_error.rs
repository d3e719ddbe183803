//! Application error types
//!
//! Failures raised outside the domain model: credential and token checks,
//! password policy, and infrastructure that the API needs at startup.

use market_core::DomainError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No active account found with the given credentials")]
    InvalidCredentials,

    #[error("Token is invalid")]
    InvalidToken,

    #[error("Token is expired")]
    TokenExpired,

    /// Rejected input that is not tied to a request field, e.g. password policy
    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl AppError {
    /// HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidCredentials | Self::InvalidToken | Self::TokenExpired => 401,
            Self::Validation(_) => 400,
            Self::Database(_)
            | Self::Cache(_)
            | Self::Storage(_)
            | Self::Config(_)
            | Self::Internal(_) => 500,
            Self::Domain(e) => domain_status(e),
        }
    }

    /// Machine-readable code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Status code for a domain error
#[must_use]
pub fn domain_status(err: &DomainError) -> u16 {
    if err.is_not_found() {
        404
    } else if err.is_validation() {
        400
    } else if err.is_conflict() {
        409
    } else {
        500
    }
}
