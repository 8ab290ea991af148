// src/auth/mod.rs

pub mod cookie;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod service;
pub mod store;

pub use cookie::{SESSION_COOKIE, SessionCookie};
pub use error::{AuthError, AuthResult};
pub use jwt::{Claims, TokenIssuer};
pub use middleware::{AuthUser, require_auth};
pub use models::{AuthResponse, LoginRequest, RegisterRequest, User, UserWithPassword};
pub use password::PasswordHasher;
pub use service::AuthService;
pub use store::{SqliteUserStore, UserStore};
