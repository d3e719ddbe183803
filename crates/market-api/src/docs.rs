//! OpenAPI document
//!
//! Served as JSON at `/api/schema/` and browsable at `/api/docs/swagger/`.

use market_service::dto::{
    CategoryDetailResponse, CategoryResponse, HealthChecks, HealthResponse, MessageResponse,
    PhotoResponse, ProductResponse, ReactionRequest, ReactionResponse, ReactionStateResponse,
    ReadinessResponse, RefreshTokenRequest, RegisterRequest, TokenRequest, TokenResponse,
    UserResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use crate::handlers;
use crate::response::{ErrorBody, ErrorDetail};

pub const SCHEMA_PATH: &str = "/api/schema/";
pub const SWAGGER_PATH: &str = "/api/docs/swagger";

/// Multipart body for `POST /api/category/`
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct CategoryUpload {
    #[schema(example = "Lighting")]
    name: String,
    /// Optional image file
    #[schema(value_type = Option<String>, format = Binary)]
    image: Option<Vec<u8>>,
}

/// Multipart body for product create and update
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct ProductUpload {
    #[schema(example = "Desk lamp")]
    name: String,
    #[schema(example = "19.99")]
    price: String,
    /// Category id
    #[schema(example = 1)]
    category: i64,
    description: Option<String>,
    /// Up to five image files; repeat the part once per file
    #[schema(value_type = Vec<String>)]
    upload_images: Vec<Vec<u8>>,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "market", description = "Catalog and photo reaction API"),
    paths(
        handlers::auth::register,
        handlers::auth::obtain_token,
        handlers::auth::refresh_token,
        handlers::users::current_user,
        handlers::users::admin_user,
        handlers::categories::list_categories,
        handlers::categories::create_category,
        handlers::categories::get_category,
        handlers::categories::delete_category,
        handlers::products::list_products,
        handlers::products::create_product,
        handlers::products::get_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::photos::get_reaction,
        handlers::photos::toggle_reaction,
        handlers::health::health_check,
        handlers::health::readiness_check,
    ),
    components(schemas(
        RegisterRequest,
        TokenRequest,
        RefreshTokenRequest,
        ReactionRequest,
        CategoryUpload,
        ProductUpload,
        MessageResponse,
        TokenResponse,
        UserResponse,
        PhotoResponse,
        ProductResponse,
        CategoryResponse,
        CategoryDetailResponse,
        ReactionStateResponse,
        ReactionResponse,
        HealthResponse,
        HealthChecks,
        ReadinessResponse,
        ErrorBody,
        ErrorDetail,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "auth", description = "Registration and tokens"),
        (name = "users", description = "Current user"),
        (name = "categories", description = "Category management"),
        (name = "products", description = "Product management"),
        (name = "photos", description = "Photo likes and dislikes"),
        (name = "health", description = "Probes"),
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
