// src/tasks/store.rs
// Database operations for user tasks

use sqlx::SqlitePool;

use super::error::TaskResult;
use super::types::Task;

/// Database store for tasks
pub struct TaskStore {
    pool: SqlitePool,
}

impl TaskStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // Task CRUD
    // =========================================================================

    /// Create a new task
    pub async fn create(
        &self,
        user_id: &str,
        title: &str,
        description: &str,
        now: i64,
    ) -> TaskResult<Task> {
        let task = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (user_id, title, description, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING id, title, description, user_id, created_at, updated_at",
        )
        .bind(user_id)
        .bind(title)
        .bind(description)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    /// Get task by ID
    pub async fn get(&self, task_id: i64) -> TaskResult<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            "SELECT id, title, description, user_id, created_at, updated_at
             FROM tasks WHERE id = ?",
        )
        .bind(task_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    /// List all tasks owned by a user, newest first
    pub async fn list_by_owner(&self, user_id: &str) -> TaskResult<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, title, description, user_id, created_at, updated_at
             FROM tasks WHERE user_id = ?
             ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    /// Update the given fields. Matches on owner as well as id, so a
    /// non-owner update touches nothing and returns `None`.
    pub async fn update(
        &self,
        task_id: i64,
        user_id: &str,
        title: Option<&str>,
        description: Option<&str>,
        now: i64,
    ) -> TaskResult<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            "UPDATE tasks
             SET title = COALESCE(?, title),
                 description = COALESCE(?, description),
                 updated_at = ?
             WHERE id = ? AND user_id = ?
             RETURNING id, title, description, user_id, created_at, updated_at",
        )
        .bind(title)
        .bind(description)
        .bind(now)
        .bind(task_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    /// Delete a task owned by `user_id`
    pub async fn delete(&self, task_id: i64, user_id: &str) -> TaskResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
            .bind(task_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
