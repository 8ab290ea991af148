// src/tasks/types.rs
// Type definitions for user tasks

use serde::{Deserialize, Serialize};

pub const MIN_TITLE_LEN: usize = 3;

/// A task owned by exactly one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Owner
    pub user_id: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Body of a create request. No owner field: the owner is always the caller.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct NewTask {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Body of an edit request; absent fields are left unchanged
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
}
