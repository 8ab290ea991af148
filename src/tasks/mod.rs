// src/tasks/mod.rs
// Per-user task module

pub mod error;
pub mod service;
pub mod store;
pub mod types;

pub use error::{TaskError, TaskResult};
pub use service::TaskService;
pub use store::TaskStore;
pub use types::{NewTask, Task, TaskUpdate};
