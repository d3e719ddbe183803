//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use market_core::entities::{NewUser, User};
use market_core::error::DomainError;
use market_core::traits::{RepoResult, UserRepository};
use market_core::value_objects::UserId;

use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, email, is_admin, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, email, is_admin, created_at, updated_at
            FROM users
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        let exists: (bool,) =
            sqlx::query_as(r"SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(exists.0)
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let exists: (bool,) =
            sqlx::query_as(r"SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))")
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(exists.0)
    }

    #[instrument(skip(self, password_hash))]
    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User> {
        let model = sqlx::query_as::<_, UserModel>(
            r"
            INSERT INTO users (username, email, password_hash, is_admin)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, is_admin, created_at, updated_at
            ",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(password_hash)
        .bind(user.is_admin)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, |constraint| match constraint {
                Some("users_email_lower_key") => DomainError::EmailAlreadyExists,
                _ => DomainError::UsernameAlreadyExists,
            })
        })?;

        Ok(User::from(model))
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        let result: Option<(String,)> =
            sqlx::query_as(r"SELECT password_hash FROM users WHERE id = $1")
                .bind(id.into_inner())
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(result.map(|(hash,)| hash))
    }
}
