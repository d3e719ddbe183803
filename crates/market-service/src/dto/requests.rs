//! Request DTOs for API endpoints
//!
//! JSON bodies implement `Deserialize` and `Validate`. Multipart forms are
//! assembled field by field by the API layer and validated here.

use market_core::entities::MAX_PRODUCT_IMAGES;
use market_core::value_objects::{CategoryId, Price, ReactionAction};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

/// Characters Django-style usernames may contain besides letters and digits
const USERNAME_SYMBOLS: &str = "_.@+-";

fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || USERNAME_SYMBOLS.contains(c))
    {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_username").with_message(
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
                .into(),
        ))
    }
}

/// Longest category or product name, counted after trimming
const MAX_NAME_CHARS: usize = 255;

fn validate_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("blank")
            .with_message("This field may not be blank.".into()));
    }
    if trimmed.chars().count() > MAX_NAME_CHARS {
        return Err(ValidationError::new("length")
            .with_message("Name must be 1-255 characters".into()));
    }
    Ok(())
}

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(
        length(min = 3, max = 150, message = "Username must be 3-150 characters"),
        custom(function = "validate_username")
    )]
    #[schema(example = "alice")]
    pub username: String,

    #[validate(email(message = "Enter a valid email address."))]
    #[schema(example = "alice@example.com")]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// Token obtain request (username + password)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TokenRequest {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub username: String,

    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RefreshTokenRequest {
    #[serde(alias = "refresh")]
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub refresh_token: String,
}

// ============================================================================
// Reaction Requests
// ============================================================================

/// Like/dislike toggle request
///
/// Unknown actions fail deserialization with a message naming the value.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ReactionRequest {
    /// `like` or `dislike`
    #[schema(value_type = String, example = "like")]
    pub action: ReactionAction,
}

// ============================================================================
// Multipart Forms
// ============================================================================

/// An uploaded file as received from a multipart body
#[derive(Debug, Clone, Default)]
pub struct UploadedImage {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Category creation form
#[derive(Debug, Clone, Default, Validate)]
pub struct CategoryForm {
    #[validate(
        required(message = "This field is required."),
        custom(function = "validate_name")
    )]
    pub name: Option<String>,

    pub image: Option<UploadedImage>,
}

/// Product create/update form
#[derive(Debug, Clone, Default, Validate)]
pub struct ProductForm {
    #[validate(
        required(message = "This field is required."),
        custom(function = "validate_name")
    )]
    pub name: Option<String>,

    #[validate(required(message = "This field is required."))]
    pub price: Option<String>,

    #[validate(required(message = "This field is required."))]
    pub category: Option<String>,

    pub description: Option<String>,

    /// Counted in [`ProductForm::into_fields`]; contents are sniffed on save
    #[validate(skip)]
    pub upload_images: Vec<UploadedImage>,
}

/// A product form that passed validation
#[derive(Debug, Clone)]
pub struct ProductFields {
    pub name: String,
    pub price: Price,
    pub category_id: CategoryId,
    pub description: String,
    pub images: Vec<UploadedImage>,
}

impl ProductForm {
    /// Validate every field, collecting all messages before failing
    pub fn into_fields(self) -> Result<ProductFields, ValidationErrors> {
        let mut errors = self.validate().err().unwrap_or_default();

        let price = self.price.as_deref().and_then(|raw| match Price::parse(raw) {
            Ok(price) => Some(price),
            Err(e) => {
                errors.add("price", ValidationError::new("invalid").with_message(e.to_string().into()));
                None
            }
        });

        let category_id = self.category.as_deref().and_then(|raw| match CategoryId::parse(raw.trim()) {
            Ok(id) => Some(id),
            Err(_) => {
                errors.add(
                    "category",
                    ValidationError::new("incorrect_type")
                        .with_message("Incorrect type. Expected pk value.".into()),
                );
                None
            }
        });

        if self.upload_images.len() > MAX_PRODUCT_IMAGES {
            errors.add(
                "upload_images",
                ValidationError::new("too_many_images")
                    .with_message("You can upload a maximum of 5 images at once.".into()),
            );
        }

        match (self.name, price, category_id) {
            (Some(name), Some(price), Some(category_id)) if errors.is_empty() => Ok(ProductFields {
                name: name.trim().to_string(),
                price,
                category_id,
                description: self.description.unwrap_or_default(),
                images: self.upload_images,
            }),
            _ => Err(errors),
        }
    }
}
