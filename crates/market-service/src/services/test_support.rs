//! In-memory fakes of the repository, session and storage ports

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use market_common::auth::JwtService;
use market_core::entities::{
    Category, NewCategory, NewProduct, NewUser, Photo, PhotoSummary, Product, ProductChanges,
    ReactionCounts, ReactionOutcome, ReactionRecord, User,
};
use market_core::error::DomainError;
use market_core::traits::{
    CategoryRepository, FileStorage, PhotoRepository, ProductRepository, ReactionRepository,
    RepoResult, SessionStore, UserRepository,
};
use market_core::value_objects::{
    CategoryId, PhotoId, Price, ProductId, ReactionAction, ReactionEffect, ReactionState, UserId,
};

use crate::dto::UploadedImage;

use super::context::ServiceContext;

/// A tiny valid PNG signature
pub fn png() -> UploadedImage {
    UploadedImage {
        file_name: Some("photo.png".to_string()),
        bytes: b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR".to_vec(),
    }
}

#[derive(Default)]
struct State {
    next_id: i64,
    users: Vec<(User, String)>,
    categories: Vec<Category>,
    products: Vec<Product>,
    photos: Vec<Photo>,
    reactions: HashMap<(UserId, PhotoId), ReactionRecord>,
    sessions: HashMap<String, UserId>,
    files: HashSet<String>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn counts(&self, photo_id: PhotoId) -> ReactionCounts {
        let (likes, dislikes) = self
            .reactions
            .values()
            .filter(|r| r.photo_id == photo_id)
            .fold((0, 0), |(l, d), r| if r.is_like { (l + 1, d) } else { (l, d + 1) });
        ReactionCounts::new(likes, dislikes)
    }

    fn remove_products(&mut self, doomed: &HashSet<ProductId>) {
        self.products.retain(|p| !doomed.contains(&p.id));
        let photos: HashSet<PhotoId> = self
            .photos
            .iter()
            .filter(|p| doomed.contains(&p.product_id))
            .map(|p| p.id)
            .collect();
        self.photos.retain(|p| !photos.contains(&p.id));
        self.reactions.retain(|(_, photo), _| !photos.contains(photo));
    }

    fn attach(&mut self, product_id: ProductId, images: &[String]) -> Vec<Photo> {
        images
            .iter()
            .map(|image| {
                let photo = Photo {
                    id: PhotoId::new(self.next_id()),
                    product_id,
                    image: image.clone(),
                    created_at: Utc::now(),
                };
                self.photos.push(photo.clone());
                photo
            })
            .collect()
    }
}

/// Every port backed by one mutex-guarded state
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.lock().users.iter().find(|(u, _)| u.id == id).map(|(u, _)| u.clone()))
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|(u, _)| u.username == username)
            .map(|(u, _)| u.clone()))
    }

    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        Ok(self.lock().users.iter().any(|(u, _)| u.username == username))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self
            .lock()
            .users
            .iter()
            .any(|(u, _)| u.email.eq_ignore_ascii_case(email)))
    }

    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User> {
        let mut state = self.lock();
        let now = Utc::now();
        let created = User {
            id: UserId::new(state.next_id()),
            username: user.username.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
            created_at: now,
            updated_at: now,
        };
        state.users.push((created.clone(), password_hash.to_string()));
        Ok(created)
    }

    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        Ok(self.lock().users.iter().find(|(u, _)| u.id == id).map(|(_, h)| h.clone()))
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn find_all(&self) -> RepoResult<Vec<Category>> {
        Ok(self.lock().categories.clone())
    }

    async fn find_by_id(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        Ok(self.lock().categories.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, category: &NewCategory) -> RepoResult<Category> {
        let mut state = self.lock();
        if state.categories.iter().any(|c| c.name == category.name) {
            return Err(DomainError::NameAlreadyExists(category.name.clone()));
        }
        let created = Category {
            id: CategoryId::new(state.next_id()),
            name: category.name.clone(),
            image: category.image.clone(),
            created_at: Utc::now(),
        };
        state.categories.push(created.clone());
        Ok(created)
    }

    async fn delete(&self, id: CategoryId) -> RepoResult<Vec<String>> {
        let mut state = self.lock();
        let index = state
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or(DomainError::CategoryNotFound(id))?;
        let category = state.categories.remove(index);

        let doomed: HashSet<ProductId> = state
            .products
            .iter()
            .filter(|p| p.category_id == id)
            .map(|p| p.id)
            .collect();
        let paths: Vec<String> = category
            .image
            .into_iter()
            .chain(
                state
                    .photos
                    .iter()
                    .filter(|p| doomed.contains(&p.product_id))
                    .map(|p| p.image.clone()),
            )
            .collect();
        state.remove_products(&doomed);
        Ok(paths)
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn find_all(&self) -> RepoResult<Vec<Product>> {
        Ok(self.lock().products.clone())
    }

    async fn find_by_id(&self, id: ProductId) -> RepoResult<Option<Product>> {
        Ok(self.lock().products.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_categories(&self, category_ids: &[CategoryId]) -> RepoResult<Vec<Product>> {
        Ok(self
            .lock()
            .products
            .iter()
            .filter(|p| category_ids.contains(&p.category_id))
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        product: &NewProduct,
        images: &[String],
    ) -> RepoResult<(Product, Vec<Photo>)> {
        let mut state = self.lock();
        if !state.categories.iter().any(|c| c.id == product.category_id) {
            return Err(DomainError::CategoryNotFound(product.category_id));
        }
        if state.products.iter().any(|p| p.name == product.name) {
            return Err(DomainError::NameAlreadyExists(product.name.clone()));
        }
        let now = Utc::now();
        let created = Product {
            id: ProductId::new(state.next_id()),
            name: product.name.clone(),
            price: product.price,
            description: product.description.clone(),
            category_id: product.category_id,
            created_at: now,
            updated_at: now,
        };
        state.products.push(created.clone());
        let photos = state.attach(created.id, images);
        Ok((created, photos))
    }

    async fn update(
        &self,
        id: ProductId,
        changes: &ProductChanges,
        new_images: &[String],
        max_images: usize,
    ) -> RepoResult<Product> {
        let mut state = self.lock();
        let existing = state.photos.iter().filter(|p| p.product_id == id).count();
        let Some(product) = state.products.iter_mut().find(|p| p.id == id) else {
            return Err(DomainError::ProductNotFound(id));
        };
        if existing + new_images.len() > max_images {
            return Err(DomainError::TooManyImages { max: max_images });
        }
        product.name.clone_from(&changes.name);
        product.price = changes.price;
        product.description.clone_from(&changes.description);
        product.category_id = changes.category_id;
        product.updated_at = Utc::now();
        let updated = product.clone();
        state.attach(id, new_images);
        Ok(updated)
    }

    async fn delete(&self, id: ProductId) -> RepoResult<()> {
        let mut state = self.lock();
        if !state.products.iter().any(|p| p.id == id) {
            return Err(DomainError::ProductNotFound(id));
        }
        state.remove_products(&HashSet::from([id]));
        Ok(())
    }
}

#[async_trait]
impl PhotoRepository for MemoryStore {
    async fn find_by_id(&self, id: PhotoId) -> RepoResult<Option<Photo>> {
        Ok(self.lock().photos.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_products(&self, product_ids: &[ProductId]) -> RepoResult<Vec<PhotoSummary>> {
        let state = self.lock();
        Ok(state
            .photos
            .iter()
            .filter(|p| product_ids.contains(&p.product_id))
            .map(|p| PhotoSummary {
                photo: p.clone(),
                counts: state.counts(p.id),
            })
            .collect())
    }

    async fn count_by_product(&self, product_id: ProductId) -> RepoResult<i64> {
        let count = self.lock().photos.iter().filter(|p| p.product_id == product_id).count();
        Ok(count as i64)
    }
}

#[async_trait]
impl ReactionRepository for MemoryStore {
    async fn find(&self, user_id: UserId, photo_id: PhotoId) -> RepoResult<Option<ReactionRecord>> {
        let state = self.lock();
        if !state.photos.iter().any(|p| p.id == photo_id) {
            return Err(DomainError::PhotoNotFound(photo_id));
        }
        Ok(state.reactions.get(&(user_id, photo_id)).cloned())
    }

    async fn apply_action(
        &self,
        user_id: UserId,
        photo_id: PhotoId,
        action: ReactionAction,
    ) -> RepoResult<ReactionOutcome> {
        let mut state = self.lock();
        if !state.photos.iter().any(|p| p.id == photo_id) {
            return Err(DomainError::PhotoNotFound(photo_id));
        }

        let key = (user_id, photo_id);
        let current = state.reactions.get(&key).map(|r| r.is_like);
        let transition = ReactionState::from_record(current).apply(action);

        match transition.effect {
            ReactionEffect::Create(is_like) => {
                state.reactions.insert(
                    key,
                    ReactionRecord {
                        user_id,
                        photo_id,
                        is_like,
                        created_at: Utc::now(),
                    },
                );
            }
            ReactionEffect::Flip(is_like) => {
                if let Some(record) = state.reactions.get_mut(&key) {
                    record.is_like = is_like;
                }
            }
            ReactionEffect::Remove => {
                state.reactions.remove(&key);
            }
        }

        Ok(ReactionOutcome {
            state: transition.next,
            counts: state.counts(photo_id),
        })
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn create(&self, session_id: &str, user_id: UserId, _ttl_seconds: u64) -> RepoResult<()> {
        self.lock().sessions.insert(session_id.to_string(), user_id);
        Ok(())
    }

    async fn consume(&self, session_id: &str) -> RepoResult<Option<UserId>> {
        Ok(self.lock().sessions.remove(session_id))
    }
}

#[async_trait]
impl FileStorage for MemoryStore {
    async fn save(&self, folder: &str, extension: &str, _bytes: &[u8]) -> RepoResult<String> {
        let mut state = self.lock();
        let path = format!("{folder}/{}.{extension}", state.next_id());
        state.files.insert(path.clone());
        Ok(path)
    }

    async fn delete(&self, path: &str) -> RepoResult<()> {
        self.lock().files.remove(path);
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("/media/{path}")
    }
}

/// A service context wired to a fresh [`MemoryStore`]
pub struct TestContext {
    pub ctx: ServiceContext,
    store: Arc<MemoryStore>,
}

impl TestContext {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());
        let ctx = ServiceContext::builder()
            .user_repo(store.clone())
            .category_repo(store.clone())
            .product_repo(store.clone())
            .photo_repo(store.clone())
            .reaction_repo(store.clone())
            .session_store(store.clone())
            .file_storage(store.clone())
            .max_upload_bytes(1024 * 1024)
            .jwt_service(Arc::new(JwtService::new("test-secret", 900, 86_400)))
            .build()
            .unwrap();
        Self { ctx, store }
    }

    pub fn insert_user(&self, username: &str, is_admin: bool) -> UserId {
        let mut state = self.store.lock();
        let now = Utc::now();
        let user = User {
            id: UserId::new(state.next_id()),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            is_admin,
            created_at: now,
            updated_at: now,
        };
        let id = user.id;
        state.users.push((user, String::new()));
        id
    }

    pub fn insert_category(&self, name: &str) -> CategoryId {
        let mut state = self.store.lock();
        let category = Category {
            id: CategoryId::new(state.next_id()),
            name: name.to_string(),
            image: None,
            created_at: Utc::now(),
        };
        let id = category.id;
        state.categories.push(category);
        id
    }

    /// A photo on a fresh product in a fresh category
    pub fn insert_photo(&self) -> PhotoId {
        let category_id = self.insert_category("Photos");
        let mut state = self.store.lock();
        let now = Utc::now();
        let product = Product {
            id: ProductId::new(state.next_id()),
            name: "Camera".to_string(),
            price: Price::parse("1.00").unwrap(),
            description: String::new(),
            category_id,
            created_at: now,
            updated_at: now,
        };
        let product_id = product.id;
        state.products.push(product);
        state.attach(product_id, &["products/camera.png".to_string()])[0].id
    }

    pub fn stored_files(&self) -> usize {
        self.store.lock().files.len()
    }

    pub fn reaction_rows(&self) -> usize {
        self.store.lock().reactions.len()
    }
}
