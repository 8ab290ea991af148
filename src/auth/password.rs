// src/auth/password.rs

use bcrypt::{BcryptError, hash, verify};

use super::error::{AuthError, AuthResult};

/// bcrypt with a configurable cost. Both operations run on the blocking
/// pool so a slow hash never stalls the async workers.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub async fn hash(&self, password: &str) -> AuthResult<String> {
        let cost = self.cost;
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hash(password, cost))
            .await?
            .map_err(|e: BcryptError| AuthError::internal(format!("Failed to hash password: {}", e)))
    }

    pub async fn verify(&self, password: &str, digest: &str) -> AuthResult<bool> {
        let password = password.to_string();
        let digest = digest.to_string();
        tokio::task::spawn_blocking(move || verify(password, &digest))
            .await?
            .map_err(|e: BcryptError| {
                AuthError::internal(format!("Failed to verify password: {}", e))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MIN_BCRYPT_COST;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hasher = PasswordHasher::new(MIN_BCRYPT_COST);
        let digest = hasher.hash("hunter22").await.unwrap();

        assert_ne!(digest, "hunter22");
        assert!(hasher.verify("hunter22", &digest).await.unwrap());
        assert!(!hasher.verify("hunter23", &digest).await.unwrap());
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let hasher = PasswordHasher::new(MIN_BCRYPT_COST);
        let a = hasher.hash("same-password").await.unwrap();
        let b = hasher.hash("same-password").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_corrupt_digest_is_internal_error() {
        let hasher = PasswordHasher::new(MIN_BCRYPT_COST);
        let result = hasher.verify("whatever", "not-a-bcrypt-hash").await;
        assert!(matches!(result, Err(AuthError::Internal(_))));
    }
}
