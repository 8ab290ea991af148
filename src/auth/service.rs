// src/auth/service.rs

use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::error::{AuthError, AuthResult};
use super::jwt::TokenIssuer;
use super::models::{AuthResponse, LoginRequest, RegisterRequest, User, UserWithPassword};
use super::password::PasswordHasher;
use super::store::UserStore;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_NAME_LEN: usize = 3;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern compiles");
}

/// Registration, login and session verification over an injected store,
/// signing key and hash cost.
pub struct AuthService {
    store: Arc<dyn UserStore>,
    issuer: TokenIssuer,
    hasher: PasswordHasher,
    // Verified against on unknown-email logins, built at the configured cost
    dummy_hash: OnceCell<String>,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, issuer: TokenIssuer, hasher: PasswordHasher) -> Self {
        Self {
            store,
            issuer,
            hasher,
            dummy_hash: OnceCell::new(),
        }
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    pub async fn register(&self, req: RegisterRequest) -> AuthResult<AuthResponse> {
        let (Some(fullname), Some(username), Some(email), Some(password)) = (
            present(req.fullname.as_deref()),
            present(req.username.as_deref()),
            present(req.email.as_deref()),
            req.password.as_deref().filter(|p| !p.is_empty()),
        ) else {
            return Err(AuthError::validation("All fields are required"));
        };

        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        if fullname.chars().count() < MIN_NAME_LEN {
            return Err(AuthError::validation(format!(
                "Full name must be at least {} characters",
                MIN_NAME_LEN
            )));
        }
        if username.chars().count() < MIN_NAME_LEN {
            return Err(AuthError::validation(format!(
                "Username must be at least {} characters",
                MIN_NAME_LEN
            )));
        }
        let email = normalize_email(email);
        if !EMAIL_RE.is_match(&email) {
            return Err(AuthError::validation("Please enter a valid email address"));
        }

        if self.store.find_by_email(&email).await?.is_some() {
            return Err(AuthError::conflict("User already exists"));
        }

        let password_hash = self.hasher.hash(password).await?;
        let now = chrono::Utc::now().timestamp();

        let row = UserWithPassword {
            id: Uuid::new_v4().to_string(),
            fullname: fullname.to_string(),
            username: username.to_string(),
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        };
        self.store.insert(&row).await?;

        let token = self.issuer.issue(&row.id)?;
        info!(user_id = %row.id, "Registered user {}", row.username);

        Ok(AuthResponse {
            user: row.into(),
            token,
        })
    }

    pub async fn login(&self, req: LoginRequest) -> AuthResult<AuthResponse> {
        let (Some(email), Some(password)) = (
            present(req.email.as_deref()),
            req.password.as_deref().filter(|p| !p.is_empty()),
        ) else {
            return Err(AuthError::validation("Email and password are required"));
        };

        let Some(user) = self.store.find_by_email(&normalize_email(email)).await? else {
            debug!("Login attempt for unknown email");
            // Same bcrypt work as a wrong password
            self.hasher.verify(password, self.dummy_hash().await?).await?;
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &user.password_hash).await? {
            warn!(user_id = %user.id, "Login failed: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.issuer.issue(&user.id)?;
        info!(user_id = %user.id, "User logged in");

        Ok(AuthResponse {
            user: user.into(),
            token,
        })
    }

    async fn dummy_hash(&self) -> AuthResult<&str> {
        self.dummy_hash
            .get_or_try_init(|| self.hasher.hash("no-such-account"))
            .await
            .map(String::as_str)
    }

    /// Session gate: cookie value in, hash-free user out
    pub async fn authenticate(&self, token: Option<&str>) -> AuthResult<User> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let claims = self.issuer.verify(token)?;

        // Signatures outlive accounts, so the lookup is not optional
        let user = self
            .store
            .find_by_id(&claims.sub)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(user.into())
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MIN_BCRYPT_COST;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory store so the gate can be exercised without SQLite
    #[derive(Default)]
    struct FakeStore {
        users: Mutex<HashMap<String, UserWithPassword>>,
        inserts: Mutex<usize>,
    }

    impl FakeStore {
        fn remove(&self, user_id: &str) {
            self.users.lock().unwrap().remove(user_id);
        }

        fn len(&self) -> usize {
            self.users.lock().unwrap().len()
        }

        fn insert_calls(&self) -> usize {
            *self.inserts.lock().unwrap()
        }
    }

    #[async_trait]
    impl UserStore for FakeStore {
        async fn find_by_id(&self, user_id: &str) -> AuthResult<Option<UserWithPassword>> {
            Ok(self.users.lock().unwrap().get(user_id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> AuthResult<Option<UserWithPassword>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .values()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn insert(&self, user: &UserWithPassword) -> AuthResult<()> {
            *self.inserts.lock().unwrap() += 1;
            let mut users = self.users.lock().unwrap();
            if users
                .values()
                .any(|u| u.email == user.email || u.username == user.username)
            {
                return Err(AuthError::conflict("User already exists"));
            }
            users.insert(user.id.clone(), user.clone());
            Ok(())
        }
    }

    fn service() -> (AuthService, Arc<FakeStore>) {
        let store = Arc::new(FakeStore::default());
        let service = AuthService::new(
            store.clone(),
            TokenIssuer::new(b"fake-key", 3600),
            PasswordHasher::new(MIN_BCRYPT_COST),
        );
        (service, store)
    }

    fn registration() -> RegisterRequest {
        RegisterRequest {
            fullname: Some("Ada Lovelace".to_string()),
            username: Some("ada".to_string()),
            email: Some("Ada@Example.com".to_string()),
            password: Some("analytical".to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_missing_fields() {
        let (service, store) = service();

        let cases = [
            RegisterRequest { fullname: None, ..registration() },
            RegisterRequest { username: None, ..registration() },
            RegisterRequest { email: Some("   ".to_string()), ..registration() },
            RegisterRequest { password: Some(String::new()), ..registration() },
        ];

        for req in cases {
            let err = service.register(req).await.unwrap_err();
            assert!(matches!(err, AuthError::Validation(ref m) if m == "All fields are required"));
        }
        assert_eq!(store.len(), 0);
        assert_eq!(store.insert_calls(), 0);
    }

    #[tokio::test]
    async fn test_register_short_password_never_persists() {
        let (service, store) = service();
        let req = RegisterRequest {
            password: Some("12345".to_string()),
            ..registration()
        };

        let err = service.register(req).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(ref m) if m.contains("at least 6")));
        assert_eq!(store.insert_calls(), 0);
    }

    #[tokio::test]
    async fn test_register_field_rules() {
        let (service, _) = service();

        let short_name = RegisterRequest {
            fullname: Some("Al".to_string()),
            ..registration()
        };
        assert!(matches!(
            service.register(short_name).await,
            Err(AuthError::Validation(_))
        ));

        let bad_email = RegisterRequest {
            email: Some("not-an-email".to_string()),
            ..registration()
        };
        assert!(matches!(
            service.register(bad_email).await,
            Err(AuthError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_register_normalizes_email_and_hashes() {
        let (service, store) = service();
        let resp = service.register(registration()).await.unwrap();

        assert_eq!(resp.user.email, "ada@example.com");
        assert!(!resp.token.is_empty());

        let stored = store.find_by_id(&resp.user.id).await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "analytical");
        assert!(stored.password_hash.starts_with("$2"));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let (service, store) = service();
        let first = service.register(registration()).await.unwrap();

        let again = RegisterRequest {
            username: Some("ada2".to_string()),
            email: Some("ada@example.com".to_string()),
            ..registration()
        };
        let err = service.register(again).await.unwrap_err();
        assert!(matches!(err, AuthError::Conflict(_)));

        assert_eq!(store.len(), 1);
        let kept = store.find_by_id(&first.user.id).await.unwrap().unwrap();
        assert_eq!(kept.username, "ada");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (service, _) = service();
        service.register(registration()).await.unwrap();

        let wrong_password = service
            .login(LoginRequest {
                email: Some("ada@example.com".to_string()),
                password: Some("wrong-password".to_string()),
            })
            .await
            .unwrap_err();
        let unknown_email = service
            .login(LoginRequest {
                email: Some("nobody@example.com".to_string()),
                password: Some("analytical".to_string()),
            })
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_unknown_email_still_runs_bcrypt() {
        let (service, _) = service();
        assert!(service.dummy_hash.get().is_none());

        let err = service
            .login(LoginRequest {
                email: Some("ghost@example.com".to_string()),
                password: Some("whatever".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));

        let dummy = service.dummy_hash.get().unwrap();
        assert!(dummy.starts_with(&format!("$2b${:02}$", MIN_BCRYPT_COST)));
        assert!(!service.hasher.verify("whatever", dummy).await.unwrap());
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let (service, _) = service();
        let err = service
            .login(LoginRequest {
                email: Some("ada@example.com".to_string()),
                password: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[tokio::test]
    async fn test_login_then_authenticate() {
        let (service, _) = service();
        service.register(registration()).await.unwrap();

        let resp = service
            .login(LoginRequest {
                email: Some("  ADA@example.com ".to_string()),
                password: Some("analytical".to_string()),
            })
            .await
            .unwrap();

        let user = service.authenticate(Some(&resp.token)).await.unwrap();
        assert_eq!(user, resp.user);
    }

    #[tokio::test]
    async fn test_authenticate_rejections() {
        let (service, _) = service();

        assert!(matches!(
            service.authenticate(None).await,
            Err(AuthError::MissingToken)
        ));
        assert!(matches!(
            service.authenticate(Some("")).await,
            Err(AuthError::MissingToken)
        ));
        assert!(matches!(
            service.authenticate(Some("garbage")).await,
            Err(AuthError::InvalidToken)
        ));

        let stale = service.issuer().issue_at("someone", 1_000).unwrap();
        assert!(matches!(
            service.authenticate(Some(&stale)).await,
            Err(AuthError::TokenExpired)
        ));
    }

    #[tokio::test]
    async fn test_authenticate_after_account_removed() {
        let (service, store) = service();
        let resp = service.register(registration()).await.unwrap();

        store.remove(&resp.user.id);

        let err = service.authenticate(Some(&resp.token)).await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }
}
