//! File storage port

use async_trait::async_trait;

use super::RepoResult;

/// Binary object storage for uploaded images.
///
/// Paths are storage-relative (e.g. `products/3f2c….png`); `url` turns them
/// into something a client can fetch. Content checks are the caller's job.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Store `bytes` under `folder` with a generated name, returning its path
    async fn save(&self, folder: &str, extension: &str, bytes: &[u8]) -> RepoResult<String>;

    /// Remove a stored file; missing files are not an error
    async fn delete(&self, path: &str) -> RepoResult<()>;

    /// Public URL for a stored path
    fn url(&self, path: &str) -> String;
}
