use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;
use crate::catalog;
use crate::error::{RunError, TaskError};
use crate::models::{LaunchResponse, Parameters, TaskInstance, TaskStatus, TaskType};
use crate::runner;

/// Owns every launched task instance. Cloning yields another handle to the same store.
#[derive(Clone)]
pub struct TaskRegistry {
  task_types: Arc<Vec<TaskType>>,
  instances: Arc<RwLock<HashMap<String, TaskInstance>>>,
}

impl Default for TaskRegistry {
  fn default() -> Self {
    Self::new()
  }
}

impl TaskRegistry {
  pub fn new() -> Self {
    Self::with_task_types(catalog::task_types())
  }

  pub fn with_task_types(task_types: Vec<TaskType>) -> Self {
    Self {
      task_types: Arc::new(task_types),
      instances: Arc::new(RwLock::new(HashMap::new())),
    }
  }

  pub fn list_task_types(&self) -> &[TaskType] {
    &self.task_types
  }

  pub async fn launch(&self, task_type_id: &str, parameters: Option<Parameters>) -> Result<LaunchResponse, TaskError> {
    let task_type = self.task_types
      .iter()
      .find(|t| t.id == task_type_id)
      .ok_or_else(|| TaskError::TaskTypeNotFound(task_type_id.to_string()))?;

    let instance_id = format!("{}-{}", task_type.id, Uuid::new_v4());
    let instance = TaskInstance::running(instance_id.clone(), task_type.id.clone(), parameters.clone());

    match self.instances.write().await.entry(instance_id.clone()) {
      Entry::Occupied(_) => {
        return Err(TaskError::InvalidState(format!("instance {} already exists", instance_id)));
      }
      Entry::Vacant(slot) => {
        slot.insert(instance);
      }
    }

    runner::spawn(self.clone(), instance_id.clone(), task_type.id.clone(), parameters);
    info!("Task {} launched as {}", task_type.id, instance_id);

    Ok(LaunchResponse {
      instance_id,
      message: format!("任务 {} 已启动", task_type.name),
      status: TaskStatus::Running,
    })
  }

  pub async fn get(&self, instance_id: &str) -> Result<TaskInstance, TaskError> {
    self.instances
      .read()
      .await
      .get(instance_id)
      .cloned()
      .ok_or_else(|| TaskError::InstanceNotFound(instance_id.to_string()))
  }

  pub async fn cancel(&self, instance_id: &str) -> Result<TaskInstance, TaskError> {
    let mut instances = self.instances.write().await;
    let instance = instances
      .get_mut(instance_id)
      .ok_or_else(|| TaskError::InstanceNotFound(instance_id.to_string()))?;
    if instance.status.is_terminal() {
      return Err(TaskError::InvalidState(format!(
        "instance {} is already {:?}",
        instance_id, instance.status
      )));
    }
    instance.status = TaskStatus::Cancelled;
    instance.end_time = Some(Utc::now());
    info!("Task {} cancelled", instance_id);
    Ok(instance.clone())
  }

  pub async fn len(&self) -> usize {
    self.instances.read().await.len()
  }

  pub async fn is_empty(&self) -> bool {
    self.len().await == 0
  }

  /// Applies the runner's outcome. Only a `Running` instance moves; anything else is left alone.
  pub(crate) async fn settle(&self, instance_id: &str, outcome: Result<Value, RunError>) {
    let mut instances = self.instances.write().await;
    let Some(instance) = instances.get_mut(instance_id) else {
      debug!("Task {} vanished before settling", instance_id);
      return;
    };
    if instance.status != TaskStatus::Running {
      debug!("Task {} is {:?}, dropping runner outcome", instance_id, instance.status);
      return;
    }
    instance.end_time = Some(Utc::now());
    match outcome {
      Ok(result) => {
        instance.status = TaskStatus::Completed;
        instance.progress = 100;
        instance.result = Some(result);
        info!("Task {} completed", instance_id);
      }
      Err(e) => {
        instance.status = TaskStatus::Error;
        instance.error = Some(e.to_string());
      }
    }
  }
}
