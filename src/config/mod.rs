// src/config/mod.rs
// Central configuration for the task board backend

pub mod auth;
pub mod helpers;
pub mod server;

use anyhow::Result;

pub use auth::{AuthConfig, MAX_BCRYPT_COST, MIN_BCRYPT_COST};
pub use server::{DatabaseConfig, LoggingConfig, ServerConfig};

/// Main configuration structure - composes all domain configs
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        // Load .env file
        dotenv::dotenv().ok(); // Don't fail if .env doesn't exist (for production)

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            logging: LoggingConfig::from_env(),
            auth: AuthConfig::from_env()?,
        })
    }

    /// Validate config on startup
    pub fn validate(&self) -> Result<()> {
        self.auth.validate()?;
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        self.server.bind_address()
    }
}
