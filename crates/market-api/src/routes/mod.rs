//! Route definitions
//!
//! REST endpoints live under `/api`. Detail paths answer with and without
//! the trailing slash.

use axum::{
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::{ApiDoc, SCHEMA_PATH, SWAGGER_PATH};
use crate::handlers::{auth, categories, health, photos, products, users};
use crate::state::AppState;

/// Create the API router (rate limited when enabled)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Health check routes (kept outside the rate limiter)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Swagger UI and the OpenAPI document
pub fn docs_routes() -> Router<AppState> {
    Router::new().merge(SwaggerUi::new(SWAGGER_PATH).url(SCHEMA_PATH, ApiDoc::openapi()))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(category_routes())
        .merge(product_routes())
        .merge(photo_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register/", post(auth::register))
        .route("/token/", post(auth::obtain_token))
        .route("/token/refresh/", post(auth::refresh_token))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user/", get(users::current_user))
        .route("/admin-user/", get(users::admin_user))
}

fn category_routes() -> Router<AppState> {
    let detail = get(categories::get_category).delete(categories::delete_category);

    Router::new()
        .route(
            "/category/",
            get(categories::list_categories).post(categories::create_category),
        )
        .route("/category/:id", detail.clone())
        .route("/category/:id/", detail)
}

fn product_routes() -> Router<AppState> {
    let detail = get(products::get_product)
        .put(products::update_product)
        .delete(products::delete_product);

    Router::new()
        .route(
            "/product/",
            get(products::list_products).post(products::create_product),
        )
        .route("/product/:id", detail.clone())
        .route("/product/:id/", detail)
}

fn photo_routes() -> Router<AppState> {
    Router::new().route(
        "/photos/:id/like/",
        get(photos::get_reaction).post(photos::toggle_reaction),
    )
}
