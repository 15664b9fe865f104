/// Task runner error types
use crate::bundle::Variant;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Task '{0}' is not registered")]
    UnknownTask(String),
    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task '{task}' failed: {message}")]
    Failed { task: String, message: String },
    #[error("Bundling failed for {}", .variants.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "))]
    BuildFailed { variants: Vec<Variant> },
}

impl TaskError {
    /// Create a new Failed error
    pub fn failed(task: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            task: task.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for task operations
pub type TaskResult<T> = Result<T, TaskError>;
