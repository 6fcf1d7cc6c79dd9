use thiserror::Error;

/// Errors returned to callers of the task registry.
#[derive(Debug, Error)]
pub enum TaskError {
  #[error("Task type not found: {0}")]
  TaskTypeNotFound(String),

  #[error("Task instance not found: {0}")]
  InstanceNotFound(String),

  #[error("Invalid state: {0}")]
  InvalidState(String),
}

impl TaskError {
  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::TaskTypeNotFound(_) | Self::InstanceNotFound(_))
  }
}

impl warp::reject::Reject for TaskError {}

/// Failures while computing a task result. The display string becomes the
/// instance's `error` field.
#[derive(Debug, Error)]
pub enum RunError {
  #[error("No runner registered for task type '{0}'")]
  Unsupported(String),

  #[error("Invalid parameter '{name}': {reason}")]
  InvalidParameter { name: String, reason: String },

  #[error("Failed to encode result: {0}")]
  Encode(#[from] serde_json::Error),
}
