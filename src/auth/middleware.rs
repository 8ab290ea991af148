// src/auth/middleware.rs
// Session gate run ahead of every protected route

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tracing::debug;

use super::cookie::session_token;
use super::models::User;
use crate::api::error::ApiError;
use crate::state::AppState;

/// Identity attached to the request by [`require_auth`]
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn id(&self) -> &str {
        &self.0.id
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Login required"))
    }
}

/// Verify the session cookie and attach the user, or stop the request here.
/// One attempt, no fallback credential source.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = session_token(&jar);

    let user = state
        .auth_service
        .authenticate(token.as_deref())
        .await
        .inspect_err(|e| {
            if e.is_unauthenticated() {
                debug!(path = %request.uri().path(), "Rejected request: {}", e);
            }
        })?;

    request.extensions_mut().insert(AuthUser(user));
    Ok(next.run(request).await)
}
