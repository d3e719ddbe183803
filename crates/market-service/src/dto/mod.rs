//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs (JSON bodies and multipart forms)
//! - Response DTOs for serializing API outputs

pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    CategoryForm, ProductFields, ProductForm, ReactionRequest, RefreshTokenRequest,
    RegisterRequest, TokenRequest, UploadedImage,
};

// Re-export commonly used response types
pub use responses::{
    CategoryDetailResponse, CategoryResponse, HealthChecks, HealthResponse, MessageResponse,
    PhotoResponse, ProductResponse, ReactionResponse, ReactionStateResponse, ReadinessResponse,
    TokenResponse, UserResponse,
};
