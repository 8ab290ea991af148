// src/tasks/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("{0}")]
    Validation(String),
    #[error("Task not found")]
    NotFound,
    #[error("You do not have permission to modify this task")]
    Forbidden,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TaskError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<sqlx::Error> for TaskError {
    fn from(err: sqlx::Error) -> Self {
        Self::Internal(format!("database error: {}", err))
    }
}

pub type TaskResult<T> = Result<T, TaskError>;
