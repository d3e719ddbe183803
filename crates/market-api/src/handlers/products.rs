//! Product handlers
//!
//! Reads are public. Writes take a multipart form with up to five
//! `upload_images` parts.

use axum::{extract::State, Json};
use market_core::ProductId;
use market_service::dto::{ProductForm, ProductResponse};
use market_service::ProductService;

use crate::docs::ProductUpload;
use crate::extractors::{AuthUser, IdPath, MultipartForm};
use crate::response::{ApiResult, Created, ErrorBody, NoContent};
use crate::state::AppState;

/// List products
///
/// GET /api/product/
#[utoipa::path(
    get,
    path = "/api/product/",
    tag = "products",
    responses((status = 200, description = "All products", body = [ProductResponse]))
)]
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<ProductResponse>>> {
    let service = ProductService::new(state.service_context());
    Ok(Json(service.list().await?))
}

/// Create a product
///
/// POST /api/product/
#[utoipa::path(
    post,
    path = "/api/product/",
    tag = "products",
    security(("bearer_auth" = [])),
    request_body(content = ProductUpload, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid input or too many images", body = ErrorBody),
        (status = 409, description = "Name taken", body = ErrorBody),
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    _auth: AuthUser,
    MultipartForm(form): MultipartForm<ProductForm>,
) -> ApiResult<Created<Json<ProductResponse>>> {
    let service = ProductService::new(state.service_context());
    let response = service.create(form).await?;
    Ok(Created(Json(response)))
}

/// Get a product
///
/// GET /api/product/{id}/
#[utoipa::path(
    get,
    path = "/api/product/{id}/",
    tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product detail", body = ProductResponse),
        (status = 404, description = "Product not found", body = ErrorBody),
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    IdPath(product_id): IdPath<ProductId>,
) -> ApiResult<Json<ProductResponse>> {
    let service = ProductService::new(state.service_context());
    Ok(Json(service.get(product_id).await?))
}

/// Replace a product's fields and append photos
///
/// PUT /api/product/{id}/
#[utoipa::path(
    put,
    path = "/api/product/{id}/",
    tag = "products",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Product id")),
    request_body(content = ProductUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Invalid input or image limit exceeded", body = ErrorBody),
        (status = 404, description = "Product not found", body = ErrorBody),
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(product_id): IdPath<ProductId>,
    MultipartForm(form): MultipartForm<ProductForm>,
) -> ApiResult<Json<ProductResponse>> {
    let service = ProductService::new(state.service_context());
    Ok(Json(service.update(product_id, form).await?))
}

/// Delete a product
///
/// DELETE /api/product/{id}/
#[utoipa::path(
    delete,
    path = "/api/product/{id}/",
    tag = "products",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found", body = ErrorBody),
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(product_id): IdPath<ProductId>,
) -> ApiResult<NoContent> {
    let service = ProductService::new(state.service_context());
    service.delete(product_id).await?;
    Ok(NoContent)
}
