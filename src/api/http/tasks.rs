// src/api/http/tasks.rs

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use axum_extra::extract::WithRejection;
use serde_json::json;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::auth::{AuthUser, require_auth};
use crate::state::AppState;
use crate::tasks::{NewTask, TaskUpdate};

/// Task routes, all behind the session gate. The `addtask`/`gettask`/
/// `edittask`/`deletetask` paths are aliases used by the existing frontend.
pub fn create_task_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/task", post(create_task).get(list_tasks))
        .route("/task/{id}", put(update_task).delete(delete_task))
        .route("/task/addtask", post(create_task))
        .route("/task/gettask", get(list_tasks))
        .route("/task/edittask/{id}", put(update_task))
        .route("/task/deletetask/{id}", delete(delete_task))
        .route_layer(from_fn_with_state(state, require_auth))
}

async fn create_task(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    WithRejection(Json(input), _): WithRejection<Json<NewTask>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let task = state.task_service.create_task(user.id(), input).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Task created successfully",
            "task": task,
        })),
    ))
}

async fn list_tasks(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let tasks = state.task_service.list_tasks(user.id()).await?;

    Ok(Json(json!({
        "message": "Tasks fetched successfully",
        "tasks": tasks,
    })))
}

async fn update_task(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
    WithRejection(Json(update), _): WithRejection<Json<TaskUpdate>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let task_id = parse_task_id(&id)?;
    let task = state
        .task_service
        .update_task(user.id(), task_id, update)
        .await?;

    Ok(Json(json!({
        "message": "Task updated successfully",
        "task": task,
    })))
}

async fn delete_task(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let task_id = parse_task_id(&id)?;
    state.task_service.delete_task(user.id(), task_id).await?;

    Ok(Json(json!({ "message": "Task deleted successfully" })))
}

fn parse_task_id(raw: &str) -> ApiResult<i64> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::bad_request("Invalid task id"))
}
