//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, category_form, check_test_env, fixtures::*, TestServer,
};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;

/// Create a category and a product with `images` photos, returning both
async fn seed_product(
    server: &TestServer,
    token: &str,
    images: usize,
) -> (CategoryResponse, ProductResponse) {
    let response = server
        .post_form("/api/category/", token, category_form(&unique_name("Category")))
        .await
        .unwrap();
    let category: CategoryResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let form = product_form(&unique_name("Product"), "19.99", category.id, images);
    let response = server.post_form("/api/product/", token, form).await.unwrap();
    let product: ProductResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    (category, product)
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/api/register/", &request).await.unwrap();
    let body: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(body.message, "User registered successfully");
}

#[tokio::test]
async fn test_register_duplicate_username() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    server.post("/api/register/", &request).await.unwrap();

    let response = server.post("/api/register/", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_register_weak_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = RegisterRequest::unique();
    request.password = "onlyletters".to_string();

    let response = server.post("/api/register/", &request).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    assert_eq!(body.error.code, "VALIDATION_ERROR");
    assert!(body.error.details.unwrap().contains_key("password"));
}

#[tokio::test]
async fn test_obtain_token_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = TokenRequest {
        username: "nobody_here".to_string(),
        password: "WrongPass123".to_string(),
    };

    let response = server.post("/api/token/", &request).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_token_rotates() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, tokens) = server.signup().await.unwrap();
    assert_eq!(tokens.token_type, "Bearer");
    assert!(tokens.expires_in > 0);

    let body = serde_json::json!({ "refresh_token": tokens.refresh_token });
    let response = server.post("/api/token/refresh/", &body).await.unwrap();
    let rotated: TokenResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_ne!(rotated.refresh_token, tokens.refresh_token);

    // The first refresh token was consumed by the rotation
    let response = server.post("/api/token/refresh/", &body).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_current_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, tokens) = server.signup().await.unwrap();

    let response = server.get_auth("/api/user/", &tokens.access_token).await.unwrap();
    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(user.id > 0);
    assert_eq!(user.username, request.username);
    assert_eq!(user.email, request.email);
    assert!(!user.is_admin);
}

#[tokio::test]
async fn test_current_user_unauthorized() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/user/").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_admin_user_forbidden_for_regular_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, tokens) = server.signup().await.unwrap();

    let response = server
        .get_auth("/api/admin-user/", &tokens.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Catalog Tests
// ============================================================================

#[tokio::test]
async fn test_create_category_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .client
        .post(format!("{}/api/category/", server.base_url()))
        .multipart(category_form("Anonymous"))
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_create_product_with_five_images() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, tokens) = server.signup().await.unwrap();
    let (category, product) = seed_product(&server, &tokens.access_token, 5).await;

    assert_eq!(product.category, category.id);
    assert_eq!(product.price, "19.99");
    assert_eq!(product.images.len(), 5);
    assert!(product
        .images
        .iter()
        .all(|p| p.likes_count == 0 && p.dislikes_count == 0));

    // Stored files are served from the public URL
    let response = server.get(&product.images[0].image).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_create_product_with_six_images_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, tokens) = server.signup().await.unwrap();
    let response = server
        .post_form(
            "/api/category/",
            &tokens.access_token,
            category_form(&unique_name("Category")),
        )
        .await
        .unwrap();
    let category: CategoryResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let form = product_form(&unique_name("Product"), "5.00", category.id, 6);
    let response = server
        .post_form("/api/product/", &tokens.access_token, form)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    let details = body.error.details.unwrap();
    assert!(details["upload_images"][0].contains('5'));

    // Nothing was created
    let response = server
        .get(&format!("/api/category/{}", category.id))
        .await
        .unwrap();
    let detail: CategoryDetailResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(detail.products.is_empty());
}

#[tokio::test]
async fn test_create_product_rejects_non_image() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, tokens) = server.signup().await.unwrap();
    let (category, _) = seed_product(&server, &tokens.access_token, 0).await;

    let form = Form::new()
        .text("name", unique_name("Product"))
        .text("price", "1.00")
        .text("category", category.id.to_string())
        .part(
            "upload_images",
            Part::bytes(b"plain text".to_vec()).file_name("notes.txt"),
        );
    let response = server
        .post_form("/api/product/", &tokens.access_token, form)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(body.error.details.unwrap().contains_key("upload_images"));
}

#[tokio::test]
async fn test_update_product_image_limit() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, tokens) = server.signup().await.unwrap();
    let (category, product) = seed_product(&server, &tokens.access_token, 3).await;
    let path = format!("/api/product/{}/", product.id);

    // 3 + 3 > 5
    let form = product_form("Renamed", "25.00", category.id, 3);
    let response = server.put_form(&path, &tokens.access_token, form).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server.get(&path).await.unwrap();
    let unchanged: ProductResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(unchanged.name, product.name);
    assert_eq!(unchanged.images.len(), 3);

    // 3 + 2 == 5
    let renamed = unique_name("Renamed");
    let form = product_form(&renamed, "25.00", category.id, 2);
    let response = server.put_form(&path, &tokens.access_token, form).await.unwrap();
    let updated: ProductResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.name, renamed);
    assert_eq!(updated.price, "25.00");
    assert_eq!(updated.images.len(), 5);
}

#[tokio::test]
async fn test_get_missing_product() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    for path in ["/api/product/999999999/", "/api/product/999999999"] {
        let response = server.get(path).await.unwrap();
        let body: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
        assert_eq!(body.error.message, "Product not found");
    }
}

#[tokio::test]
async fn test_list_products_is_public() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, tokens) = server.signup().await.unwrap();
    let (_, product) = seed_product(&server, &tokens.access_token, 1).await;

    let response = server.get("/api/product/").await.unwrap();
    let products: Vec<ProductResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(products.iter().any(|p| p.id == product.id));
}

#[tokio::test]
async fn test_delete_product() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, tokens) = server.signup().await.unwrap();
    let (_, product) = seed_product(&server, &tokens.access_token, 1).await;
    let path = format!("/api/product/{}/", product.id);

    let response = server.delete(&path).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server.delete_auth(&path, &tokens.access_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_delete_category_cascades() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, tokens) = server.signup().await.unwrap();
    let (category, product) = seed_product(&server, &tokens.access_token, 2).await;
    let photo_id = product.images[0].id;

    let like_path = format!("/api/photos/{photo_id}/like/");
    server
        .post_auth(&like_path, &tokens.access_token, &ReactionRequest::like())
        .await
        .unwrap();

    let response = server
        .delete(&format!("/api/category/{}", category.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get(&format!("/api/product/{}/", product.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .post_auth(&like_path, &tokens.access_token, &ReactionRequest::like())
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.message, "Photo not found");

    let response = server
        .get(&format!("/api/category/{}", category.id))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.message, "Category not found");
}

// ============================================================================
// Photo Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_reaction_toggle_sequence() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, tokens) = server.signup().await.unwrap();
    let (_, product) = seed_product(&server, &tokens.access_token, 1).await;
    let path = format!("/api/photos/{}/like/", product.images[0].id);
    let token = &tokens.access_token;

    let steps = [
        (ReactionRequest::like(), Some("liked"), 1, 0),
        (ReactionRequest::dislike(), Some("disliked"), 0, 1),
        (ReactionRequest::dislike(), None, 0, 0),
    ];

    for (request, state, likes, dislikes) in steps {
        let response = server.post_auth(&path, token, &request).await.unwrap();
        let result: ReactionResponse = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(result.state.as_deref(), state);
        assert_eq!(result.likes_count, likes);
        assert_eq!(result.dislikes_count, dislikes);

        let response = server.get_auth(&path, token).await.unwrap();
        let current: ReactionStateResponse = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(current.state.as_deref(), state);
    }
}

#[tokio::test]
async fn test_reaction_counts_across_users() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, alice) = server.signup().await.unwrap();
    let (_, bob) = server.signup().await.unwrap();
    let (_, product) = seed_product(&server, &alice.access_token, 1).await;
    let path = format!("/api/photos/{}/like/", product.images[0].id);

    server
        .post_auth(&path, &alice.access_token, &ReactionRequest::like())
        .await
        .unwrap();
    let response = server
        .post_auth(&path, &bob.access_token, &ReactionRequest::dislike())
        .await
        .unwrap();
    let result: ReactionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((result.likes_count, result.dislikes_count), (1, 1));

    // Bob flips straight to like
    let response = server
        .post_auth(&path, &bob.access_token, &ReactionRequest::like())
        .await
        .unwrap();
    let result: ReactionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.state.as_deref(), Some("liked"));
    assert_eq!((result.likes_count, result.dislikes_count), (2, 0));

    let response = server.get(&format!("/api/product/{}/", product.id)).await.unwrap();
    let product: ProductResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(product.images[0].likes_count, 2);
    assert_eq!(product.images[0].dislikes_count, 0);
}

#[tokio::test]
async fn test_reaction_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/photos/1/like/").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_reaction_invalid_action() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, tokens) = server.signup().await.unwrap();
    let (_, product) = seed_product(&server, &tokens.access_token, 1).await;
    let path = format!("/api/photos/{}/like/", product.images[0].id);

    let body = serde_json::json!({ "action": "love" });
    let response = server
        .post_auth(&path, &tokens.access_token, &body)
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(error.error.details.unwrap().contains_key("action"));
}
