//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use std::collections::BTreeMap;
use std::fmt;

use market_common::{domain_status, AppError};
use market_core::DomainError;
use validator::ValidationErrors;

/// Per-field validation messages, rendered as `{field: [messages]}`
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation
    Domain(DomainError),

    /// Application error (auth, tokens, etc.)
    App(AppError),

    /// Resource not found
    NotFound { resource: &'static str, id: String },

    /// Authenticated but not allowed
    Forbidden(String),

    /// Invalid input, optionally with per-field messages
    Validation { message: String, fields: FieldErrors },

    /// Conflict (e.g., duplicate resource)
    Conflict(String),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
            Self::Validation { message, .. } => write!(f, "Validation error: {message}"),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a forbidden error
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    /// Create a validation error without field details
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            fields: FieldErrors::new(),
        }
    }

    /// Create a validation error for a single field
    pub fn field(field: &str, msg: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(field.to_string(), vec![msg.into()]);
        Self::fields(fields)
    }

    /// Create a validation error from collected field messages
    pub fn fields(fields: FieldErrors) -> Self {
        Self::Validation {
            message: "Invalid input".to_string(),
            fields,
        }
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => domain_status(e),
            Self::App(e) => e.status_code(),
            Self::NotFound { .. } => 404,
            Self::Forbidden(_) => 403,
            Self::Validation { .. } => 400,
            Self::Conflict(_) => 409,
            Self::Internal(_) => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Client-facing message; missing resources read like `Photo not found`
    pub fn message(&self) -> String {
        match self {
            Self::Domain(e) => e
                .not_found_detail()
                .map_or_else(|| e.to_string(), str::to_string),
            Self::NotFound { resource, .. } => format!("{resource} not found"),
            Self::Validation { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Per-field messages, when this is a field-level validation error
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation { fields, .. } if !fields.is_empty() => Some(fields),
            _ => None,
        }
    }
}

/// Flatten `validator` errors into `{field: [messages]}`
pub fn flatten_validation_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map_or_else(|| e.code.to_string(), ToString::to_string)
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        Self::fields(flatten_validation_errors(&errors))
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
