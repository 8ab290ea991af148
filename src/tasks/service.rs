// src/tasks/service.rs
// Business logic for user tasks

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{info, warn};

use super::error::{TaskError, TaskResult};
use super::store::TaskStore;
use super::types::{MIN_TITLE_LEN, NewTask, Task, TaskUpdate};

/// Task CRUD scoped to the calling user.
///
/// `owner` is always the id resolved by the session gate, never a value
/// taken from the request body.
pub struct TaskService {
    store: TaskStore,
}

impl TaskService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            store: TaskStore::new(pool),
        }
    }

    pub async fn create_task(&self, owner: &str, input: NewTask) -> TaskResult<Task> {
        let title = input
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| TaskError::validation("Title is required to create a task"))?;
        validate_title(title)?;
        let description = input.description.as_deref().map(str::trim).unwrap_or("");

        let task = self
            .store
            .create(owner, title, description, Utc::now().timestamp())
            .await?;
        info!(task_id = task.id, user_id = %owner, "Created task: {}", task.title);

        Ok(task)
    }

    /// The caller's tasks, newest first
    pub async fn list_tasks(&self, owner: &str) -> TaskResult<Vec<Task>> {
        self.store.list_by_owner(owner).await
    }

    pub async fn update_task(
        &self,
        owner: &str,
        task_id: i64,
        update: TaskUpdate,
    ) -> TaskResult<Task> {
        self.authorize(owner, task_id).await?;

        let title = update.title.as_deref().map(str::trim);
        if let Some(title) = title {
            validate_title(title)?;
        }
        let description = update.description.as_deref().map(str::trim);

        let task = self
            .store
            .update(task_id, owner, title, description, Utc::now().timestamp())
            .await?
            // Deleted between the ownership check and the write
            .ok_or(TaskError::NotFound)?;
        info!(task_id, user_id = %owner, "Updated task");

        Ok(task)
    }

    pub async fn delete_task(&self, owner: &str, task_id: i64) -> TaskResult<()> {
        self.authorize(owner, task_id).await?;

        if !self.store.delete(task_id, owner).await? {
            return Err(TaskError::NotFound);
        }
        info!(task_id, user_id = %owner, "Deleted task");

        Ok(())
    }

    /// Existence first, then ownership
    async fn authorize(&self, owner: &str, task_id: i64) -> TaskResult<Task> {
        let task = self.store.get(task_id).await?.ok_or(TaskError::NotFound)?;

        if task.user_id != owner {
            warn!(task_id, user_id = %owner, "Denied access to task owned by another user");
            return Err(TaskError::Forbidden);
        }

        Ok(task)
    }
}

fn validate_title(title: &str) -> TaskResult<()> {
    if title.is_empty() {
        return Err(TaskError::validation("Task title is required"));
    }
    if title.chars().count() < MIN_TITLE_LEN {
        return Err(TaskError::validation(format!(
            "Task title must be at least {} characters",
            MIN_TITLE_LEN
        )));
    }
    Ok(())
}
