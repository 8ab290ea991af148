// src/config/auth.rs
// Session signing and password hashing configuration

use anyhow::{Result, bail};

use super::helpers::{env_bool, env_parsed_or, require_env};

/// Accepted bcrypt work factors; the bcrypt crate keeps its own bounds private
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

/// Authentication configuration. `Debug` redacts the signing key.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
    pub bcrypt_cost: u32,
    pub cookie_secure: bool,
}

impl AuthConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            jwt_secret: require_env("JWT_KEY")?,
            token_ttl_secs: env_parsed_or("TASKBOARD_TOKEN_TTL_SECS", 86_400)?,
            bcrypt_cost: env_parsed_or("TASKBOARD_BCRYPT_COST", 10)?,
            cookie_secure: env_bool("TASKBOARD_COOKIE_SECURE", false)?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.trim().is_empty() {
            bail!("JWT_KEY must not be empty");
        }
        if self.token_ttl_secs <= 0 {
            bail!("TASKBOARD_TOKEN_TTL_SECS must be positive");
        }
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            bail!(
                "TASKBOARD_BCRYPT_COST must be between {} and {}",
                MIN_BCRYPT_COST,
                MAX_BCRYPT_COST
            );
        }
        Ok(())
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            token_ttl_secs: 3600,
            bcrypt_cost: MIN_BCRYPT_COST,
            cookie_secure: false,
        }
    }

    #[test]
    fn test_validate_accepts_sane_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_secret() {
        let cfg = AuthConfig {
            jwt_secret: "   ".to_string(),
            ..config()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_cost_and_ttl() {
        let cfg = AuthConfig {
            bcrypt_cost: 2,
            ..config()
        };
        assert!(cfg.validate().is_err());

        let cfg = AuthConfig {
            token_ttl_secs: 0,
            ..config()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_cost_bounds_are_inclusive() {
        for cost in [MIN_BCRYPT_COST, bcrypt::DEFAULT_COST, MAX_BCRYPT_COST] {
            let cfg = AuthConfig {
                bcrypt_cost: cost,
                ..config()
            };
            assert!(cfg.validate().is_ok(), "cost {} rejected", cost);
        }

        let cfg = AuthConfig {
            bcrypt_cost: MAX_BCRYPT_COST + 1,
            ..config()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let printed = format!("{:?}", config());
        assert!(!printed.contains("test-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
