//! Local-disk implementation of the `FileStorage` port.
//!
//! Files land under `<root>/<folder>/<uuid>.<ext>` and are exposed under
//! `<public_url>/<folder>/<uuid>.<ext>`.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use market_core::{DomainError, FileStorage, RepoResult};
use tokio::fs;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::config::StorageConfig;

/// Stores uploads in a directory on the local filesystem
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
    public_url: String,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>, public_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_url: public_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.upload_dir, &config.public_url)
    }

    /// Root directory on disk
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root directory if missing
    pub async fn ensure_root(&self) -> RepoResult<()> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| DomainError::StorageError(format!("{}: {e}", self.root.display())))
    }

    /// Resolve a storage-relative path, refusing anything that escapes the root
    fn resolve(&self, relative: &str) -> RepoResult<PathBuf> {
        let rel = Path::new(relative);
        let safe = rel
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !safe || relative.is_empty() {
            return Err(DomainError::StorageError(format!(
                "refusing path outside storage root: {relative}"
            )));
        }
        Ok(self.root.join(rel))
    }

    fn sanitize_segment(value: &str) -> String {
        value
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
            .collect()
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn save(&self, folder: &str, extension: &str, bytes: &[u8]) -> RepoResult<String> {
        let folder = Self::sanitize_segment(folder);
        let extension = Self::sanitize_segment(extension);
        let relative = if folder.is_empty() {
            format!("{}.{extension}", Uuid::new_v4())
        } else {
            format!("{folder}/{}.{extension}", Uuid::new_v4())
        };

        let path = self.resolve(&relative)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::StorageError(e.to_string()))?;
        }
        fs::write(&path, bytes)
            .await
            .map_err(|e| DomainError::StorageError(e.to_string()))?;

        debug!(path = %relative, "Stored file");
        Ok(relative)
    }

    #[instrument(skip(self))]
    async fn delete(&self, path: &str) -> RepoResult<()> {
        let full = self.resolve(path)?;
        match fs::remove_file(&full).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path, "File already gone");
                Ok(())
            }
            Err(e) => Err(DomainError::StorageError(e.to_string())),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.public_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_storage() -> LocalFileStorage {
        let dir = std::env::temp_dir().join(format!("market-storage-{}", Uuid::new_v4()));
        LocalFileStorage::new(dir, "/media/")
    }

    #[tokio::test]
    async fn test_save_and_delete() {
        let storage = temp_storage();
        let path = storage.save("products", "png", b"\x89PNGdata").await.unwrap();

        assert!(path.starts_with("products/"));
        assert!(path.ends_with(".png"));
        let on_disk = storage.root().join(&path);
        assert_eq!(fs::read(&on_disk).await.unwrap(), b"\x89PNGdata");

        storage.delete(&path).await.unwrap();
        assert!(!on_disk.exists());
        // Deleting twice is fine
        storage.delete(&path).await.unwrap();

        let _ = fs::remove_dir_all(storage.root()).await;
    }

    #[tokio::test]
    async fn test_rejects_traversal() {
        let storage = temp_storage();
        assert!(storage.delete("../etc/passwd").await.is_err());
        assert!(storage.delete("/etc/passwd").await.is_err());
    }

    #[tokio::test]
    async fn test_folder_is_sanitized() {
        let storage = temp_storage();
        let path = storage.save("../cat egories", "jpg", b"x").await.unwrap();
        assert!(path.starts_with("categories/"));
        let _ = fs::remove_dir_all(storage.root()).await;
    }

    #[test]
    fn test_url() {
        let storage = temp_storage();
        assert_eq!(storage.url("products/a.png"), "/media/products/a.png");
    }
}
