// src/api/http/mod.rs

pub mod auth;
pub mod health;
pub mod tasks;

pub use auth::create_user_router;
pub use health::{health_check, index, liveness_check};
pub use tasks::create_task_router;
