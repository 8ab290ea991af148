// src/state.rs
// Application state shared across handlers

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::auth::{AuthService, PasswordHasher, SessionCookie, SqliteUserStore, TokenIssuer};
use crate::config::AuthConfig;
use crate::tasks::TaskService;

/// Everything a request handler may touch. Built once at startup and
/// read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub sqlite_pool: SqlitePool,
    pub auth_service: Arc<AuthService>,
    pub task_service: Arc<TaskService>,
    pub session_cookie: SessionCookie,
}

impl AppState {
    pub fn new(pool: SqlitePool, auth: &AuthConfig) -> Self {
        let auth_service = Arc::new(AuthService::new(
            Arc::new(SqliteUserStore::new(pool.clone())),
            TokenIssuer::new(auth.jwt_secret.as_bytes(), auth.token_ttl_secs),
            PasswordHasher::new(auth.bcrypt_cost),
        ));
        let task_service = Arc::new(TaskService::new(pool.clone()));

        Self {
            sqlite_pool: pool,
            auth_service,
            task_service,
            session_cookie: SessionCookie::new(auth.cookie_secure),
        }
    }
}
