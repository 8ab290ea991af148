// src/auth/store.rs
// Database operations for user accounts

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::error::AuthResult;
use super::models::UserWithPassword;

/// Account persistence as seen by the auth service
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, user_id: &str) -> AuthResult<Option<UserWithPassword>>;

    /// `email` is expected to be normalized already
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<UserWithPassword>>;

    /// Fails with `AuthError::Conflict` when username or email is taken
    async fn insert(&self, user: &UserWithPassword) -> AuthResult<()>;
}

/// SQLite-backed user store
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn find_by_id(&self, user_id: &str) -> AuthResult<Option<UserWithPassword>> {
        let user = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, fullname, username, email, password_hash, created_at, updated_at
             FROM users WHERE id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<UserWithPassword>> {
        let user = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, fullname, username, email, password_hash, created_at, updated_at
             FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert(&self, user: &UserWithPassword) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, fullname, username, email, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.fullname)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
