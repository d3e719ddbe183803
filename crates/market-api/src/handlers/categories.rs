//! Category handlers
//!
//! Listing and creation require a bearer token; detail and delete are open.

use axum::{extract::State, Json};
use market_core::CategoryId;
use market_service::dto::{CategoryDetailResponse, CategoryForm, CategoryResponse};
use market_service::CategoryService;

use crate::docs::CategoryUpload;
use crate::extractors::{AuthUser, IdPath, MultipartForm};
use crate::response::{ApiResult, Created, ErrorBody, NoContent};
use crate::state::AppState;

/// List categories with their products
///
/// GET /api/category/
#[utoipa::path(
    get,
    path = "/api/category/",
    tag = "categories",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All categories", body = [CategoryDetailResponse]),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
    )
)]
pub async fn list_categories(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<CategoryDetailResponse>>> {
    let service = CategoryService::new(state.service_context());
    Ok(Json(service.list().await?))
}

/// Create a category
///
/// POST /api/category/
#[utoipa::path(
    post,
    path = "/api/category/",
    tag = "categories",
    security(("bearer_auth" = [])),
    request_body(content = CategoryUpload, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 409, description = "Name taken", body = ErrorBody),
    )
)]
pub async fn create_category(
    State(state): State<AppState>,
    _auth: AuthUser,
    MultipartForm(form): MultipartForm<CategoryForm>,
) -> ApiResult<Created<Json<CategoryResponse>>> {
    let service = CategoryService::new(state.service_context());
    let response = service.create(form).await?;
    Ok(Created(Json(response)))
}

/// Get a category with its products
///
/// GET /api/category/{id}
#[utoipa::path(
    get,
    path = "/api/category/{id}",
    tag = "categories",
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category detail", body = CategoryDetailResponse),
        (status = 404, description = "Category not found", body = ErrorBody),
    )
)]
pub async fn get_category(
    State(state): State<AppState>,
    IdPath(category_id): IdPath<CategoryId>,
) -> ApiResult<Json<CategoryDetailResponse>> {
    let service = CategoryService::new(state.service_context());
    Ok(Json(service.get(category_id).await?))
}

/// Delete a category, its products, and their photos
///
/// DELETE /api/category/{id}
#[utoipa::path(
    delete,
    path = "/api/category/{id}",
    tag = "categories",
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found", body = ErrorBody),
    )
)]
pub async fn delete_category(
    State(state): State<AppState>,
    IdPath(category_id): IdPath<CategoryId>,
) -> ApiResult<NoContent> {
    let service = CategoryService::new(state.service_context());
    service.delete(category_id).await?;
    Ok(NoContent)
}
