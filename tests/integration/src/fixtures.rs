//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use std::collections::HashMap;

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

/// Short random suffix; the database outlives a single test run
pub fn unique_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..12].to_string()
}

/// A minimal PNG signature, enough for content sniffing
pub fn png_bytes() -> Vec<u8> {
    let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
    bytes.extend_from_slice(&[0, 0, 0, 13, b'I', b'H', b'D', b'R']);
    bytes
}

/// Registration request
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("user_{suffix}"),
            email: format!("user_{suffix}@example.com"),
            password: "TestPass123".to_string(),
        }
    }
}

/// Token request
#[derive(Debug, Serialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

impl TokenRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            username: reg.username.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Token pair response
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// User response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
}

#[derive(Debug, Deserialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryDetailResponse {
    pub id: i64,
    pub name: String,
    pub products: Vec<ProductResponse>,
}

#[derive(Debug, Deserialize)]
pub struct PhotoResponse {
    pub id: i64,
    pub image: String,
    pub likes_count: i64,
    pub dislikes_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub price: String,
    pub category: i64,
    pub description: String,
    pub images: Vec<PhotoResponse>,
}

/// Toggle result; `state` is `None` when the reaction was cleared
#[derive(Debug, Deserialize)]
pub struct ReactionResponse {
    pub state: Option<String>,
    pub likes_count: i64,
    pub dislikes_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct ReactionStateResponse {
    pub state: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReactionRequest {
    pub action: String,
}

impl ReactionRequest {
    pub fn like() -> Self {
        Self {
            action: "like".to_string(),
        }
    }

    pub fn dislike() -> Self {
        Self {
            action: "dislike".to_string(),
        }
    }
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: Option<HashMap<String, Vec<String>>>,
}

/// Category multipart form
pub fn category_form(name: &str) -> Form {
    Form::new().text("name", name.to_string())
}

/// Product multipart form with `images` PNG parts
pub fn product_form(name: &str, price: &str, category_id: i64, images: usize) -> Form {
    let mut form = Form::new()
        .text("name", name.to_string())
        .text("price", price.to_string())
        .text("category", category_id.to_string())
        .text("description", "Integration test product".to_string());

    for i in 0..images {
        let part = Part::bytes(png_bytes()).file_name(format!("image-{i}.png"));
        form = form.part("upload_images", part);
    }
    form
}

pub fn unique_name(prefix: &str) -> String {
    format!("{prefix} {}", unique_suffix())
}
