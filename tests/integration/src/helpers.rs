//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making HTTP requests.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use market_api::{create_app, create_app_state};
use market_common::AppConfig;
use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{RegisterRequest, TokenRequest, TokenResponse};

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub upload_dir: PathBuf,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let upload_dir = PathBuf::from(&config.storage.upload_dir);

        let state = create_app_state(config).await?;
        let app = create_app(state)?;

        // Ephemeral port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            upload_dir,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(bearer(self.client.get(self.url(path)), token).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(bearer(self.client.post(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a multipart POST request with auth token
    pub async fn post_form(&self, path: &str, token: &str, form: Form) -> Result<Response> {
        Ok(bearer(self.client.post(self.url(path)), token)
            .multipart(form)
            .send()
            .await?)
    }

    /// Make a multipart PUT request with auth token
    pub async fn put_form(&self, path: &str, token: &str, form: Form) -> Result<Response> {
        Ok(bearer(self.client.put(self.url(path)), token)
            .multipart(form)
            .send()
            .await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(bearer(self.client.delete(self.url(path)), token).send().await?)
    }

    /// Make an unauthenticated DELETE request
    pub async fn delete(&self, path: &str) -> Result<Response> {
        Ok(self.client.delete(self.url(path)).send().await?)
    }

    /// Register a fresh user and obtain its token pair
    pub async fn signup(&self) -> Result<(RegisterRequest, TokenResponse)> {
        let request = RegisterRequest::unique();
        let response = self.post("/api/register/", &request).await?;
        assert_status(response, StatusCode::CREATED).await?;

        let response = self
            .post("/api/token/", &TokenRequest::from_register(&request))
            .await?;
        let tokens = assert_json(response, StatusCode::OK).await?;
        Ok((request, tokens))
    }
}

fn bearer(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder.header("Authorization", format!("Bearer {token}"))
}

/// Create a test configuration
///
/// Uploads go to a fresh temporary directory and rate limiting is off.
pub fn test_config() -> Result<AppConfig> {
    let mut config =
        AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    config.database.run_migrations = true;
    config.rate_limit.enabled = false;
    config.storage.upload_dir = std::env::temp_dir()
        .join(format!("market-it-{}", uuid::Uuid::new_v4().simple()))
        .to_string_lossy()
        .into_owned();
    config.storage.public_url = "/media".to_string();

    Ok(config)
}

/// Helper to check if test environment is available
pub async fn check_test_env() -> bool {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    if std::env::var("REDIS_URL").is_err() {
        eprintln!("Skipping test: REDIS_URL not set");
        return false;
    }

    if std::env::var("JWT_SECRET").is_err() {
        eprintln!("Skipping test: JWT_SECRET not set");
        return false;
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
