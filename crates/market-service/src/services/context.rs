//! Service context - dependency container for services
//!
//! Holds the repositories, the refresh session store, file storage and the
//! JWT service. Everything is a trait object so services can run against
//! PostgreSQL/Redis in production and in-memory fakes in tests.

use std::sync::Arc;

use market_common::auth::JwtService;
use market_core::traits::{
    CategoryRepository, FileStorage, PhotoRepository, ProductRepository, ReactionRepository,
    SessionStore, UserRepository,
};

/// Default upload size limit (10 MiB)
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    product_repo: Arc<dyn ProductRepository>,
    photo_repo: Arc<dyn PhotoRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,

    // Refresh sessions
    session_store: Arc<dyn SessionStore>,

    // Uploaded images
    file_storage: Arc<dyn FileStorage>,
    max_upload_bytes: usize,

    jwt_service: Arc<JwtService>,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the category repository
    pub fn category_repo(&self) -> &dyn CategoryRepository {
        self.category_repo.as_ref()
    }

    /// Get the product repository
    pub fn product_repo(&self) -> &dyn ProductRepository {
        self.product_repo.as_ref()
    }

    /// Get the photo repository
    pub fn photo_repo(&self) -> &dyn PhotoRepository {
        self.photo_repo.as_ref()
    }

    /// Get the reaction repository
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    // === Sessions and storage ===

    /// Get the refresh session store
    pub fn session_store(&self) -> &dyn SessionStore {
        self.session_store.as_ref()
    }

    /// Get the file storage backend
    pub fn file_storage(&self) -> &dyn FileStorage {
        self.file_storage.as_ref()
    }

    /// Largest accepted upload, in bytes
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }
}

/// Builder for ServiceContext
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    category_repo: Option<Arc<dyn CategoryRepository>>,
    product_repo: Option<Arc<dyn ProductRepository>>,
    photo_repo: Option<Arc<dyn PhotoRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    session_store: Option<Arc<dyn SessionStore>>,
    file_storage: Option<Arc<dyn FileStorage>>,
    max_upload_bytes: usize,
    jwt_service: Option<Arc<JwtService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            user_repo: None,
            category_repo: None,
            product_repo: None,
            photo_repo: None,
            reaction_repo: None,
            session_store: None,
            file_storage: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            jwt_service: None,
        }
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn category_repo(mut self, repo: Arc<dyn CategoryRepository>) -> Self {
        self.category_repo = Some(repo);
        self
    }

    pub fn product_repo(mut self, repo: Arc<dyn ProductRepository>) -> Self {
        self.product_repo = Some(repo);
        self
    }

    pub fn photo_repo(mut self, repo: Arc<dyn PhotoRepository>) -> Self {
        self.photo_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session_store = Some(store);
        self
    }

    pub fn file_storage(mut self, storage: Arc<dyn FileStorage>) -> Self {
        self.file_storage = Some(storage);
        self
    }

    pub fn max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = bytes;
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        fn require<T>(value: Option<T>, name: &str) -> super::error::ServiceResult<T> {
            value.ok_or_else(|| super::error::ServiceError::internal(format!("{name} is required")))
        }

        Ok(ServiceContext {
            user_repo: require(self.user_repo, "user_repo")?,
            category_repo: require(self.category_repo, "category_repo")?,
            product_repo: require(self.product_repo, "product_repo")?,
            photo_repo: require(self.photo_repo, "photo_repo")?,
            reaction_repo: require(self.reaction_repo, "reaction_repo")?,
            session_store: require(self.session_store, "session_store")?,
            file_storage: require(self.file_storage, "file_storage")?,
            max_upload_bytes: self.max_upload_bytes,
            jwt_service: require(self.jwt_service, "jwt_service")?,
        })
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
