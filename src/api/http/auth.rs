// src/api/http/auth.rs

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{delete, get, post},
};
use axum_extra::extract::{WithRejection, cookie::CookieJar};
use serde_json::json;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::auth::{AuthUser, LoginRequest, RegisterRequest, require_auth};
use crate::state::AppState;

/// Routes mounted under `/user`. Only `/me` sits behind the session gate.
pub fn create_user_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let protected = Router::new()
        .route("/me", get(me))
        .route_layer(from_fn_with_state(state, require_auth));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", delete(logout))
        .merge(protected)
}

async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    WithRejection(Json(req), _): WithRejection<Json<RegisterRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let session = state.auth_service.register(req).await?;
    let cookie = state.session_cookie.build(session.token);

    Ok((
        StatusCode::CREATED,
        jar.add(cookie),
        Json(json!({
            "message": "User registered successfully",
            "user": session.user,
        })),
    ))
}

async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let session = state.auth_service.login(req).await?;
    let cookie = state.session_cookie.build(session.token);

    Ok((
        jar.add(cookie),
        Json(json!({
            "message": "Login successful",
            "user": session.user,
        })),
    ))
}

async fn me(AuthUser(user): AuthUser) -> impl IntoResponse {
    Json(json!({ "user": user }))
}

/// Clears the cookie only. The token itself stays valid until it expires.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    (
        jar.add(state.session_cookie.cleared()),
        Json(json!({ "message": "Logout successful" })),
    )
}
