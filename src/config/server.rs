// src/config/server.rs
// Server, database, and infrastructure configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::helpers::{env_or, env_parsed_or};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Single origin allowed to call the API with credentials
    pub cors_origin: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env_or("TASKBOARD_HOST", "127.0.0.1"),
            port: env_parsed_or("TASKBOARD_PORT", 3000)?,
            cors_origin: env_or("TASKBOARD_CORS_ORIGIN", "http://localhost:5173"),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            url: env_or("DATABASE_URL", "sqlite://taskboard.db"),
            max_connections: env_parsed_or("TASKBOARD_SQLITE_MAX_CONNECTIONS", 5)?,
        })
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self {
            level: env_or("TASKBOARD_LOG_LEVEL", "info"),
        }
    }
}
