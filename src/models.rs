use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};

/// Opaque key-value input bag supplied by the caller of a launch.
pub type Parameters = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskType {
  pub id: String,
  pub name: String,
  pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
  /// Declared for wire compatibility; instances are created directly in `Running`.
  Queued,
  Running,
  Completed,
  Error,
  Cancelled,
}

impl TaskStatus {
  pub fn is_terminal(&self) -> bool {
    matches!(self, Self::Completed | Self::Error | Self::Cancelled)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInstance {
  pub instance_id: String,
  pub task_type_id: String,
  pub status: TaskStatus,
  pub progress: u8,
  pub start_time: DateTime<Utc>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub end_time: Option<DateTime<Utc>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub parameters: Option<Parameters>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub result: Option<serde_json::Value>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl TaskInstance {
  pub fn running(instance_id: String, task_type_id: String, parameters: Option<Parameters>) -> Self {
    Self {
      instance_id,
      task_type_id,
      status: TaskStatus::Running,
      progress: 0,
      start_time: Utc::now(),
      end_time: None,
      parameters,
      result: None,
      error: None,
    }
  }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchRequest {
  #[serde(alias = "taskId")]
  pub task_type_id: String,
  #[serde(default)]
  pub parameters: Option<Parameters>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchResponse {
  pub instance_id: String,
  pub message: String,
  pub status: TaskStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
  Up,
  Down,
  Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluenceFactor {
  pub name: String,
  pub value: f64,
  pub description: String,
  pub trend: Trend,
  pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentFactor {
  pub sentiment: String,
  pub correlation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentCorrelation {
  pub correlation: f64,
  pub factors: Vec<SentimentFactor>,
  pub analysis: String,
}

/// Six-month visit forecast; `confidence` holds one `[low, high]` pair per point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
  pub anime: String,
  pub dates: Vec<String>,
  pub values: Vec<u32>,
  pub confidence: Vec<[u32; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCluster {
  pub name: String,
  /// `[lat, lng]`
  pub center: [f64; 2],
  pub count: u32,
  pub radius: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterReport {
  pub clusters: Vec<LocationCluster>,
  pub analysis: String,
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn instance_omits_absent_fields() {
    let instance = TaskInstance::running("time-series-1".into(), "time-series".into(), None);
    let value = serde_json::to_value(&instance).unwrap();
    assert_eq!(value["instanceId"], "time-series-1");
    assert_eq!(value["taskTypeId"], "time-series");
    assert_eq!(value["status"], "running");
    assert_eq!(value["progress"], 0);
    assert!(value.get("endTime").is_none());
    assert!(value.get("result").is_none());
    assert!(value.get("error").is_none());
  }

  #[test]
  fn launch_request_accepts_legacy_task_id() {
    let req: LaunchRequest = serde_json::from_value(json!({"taskId": "factor-analysis"})).unwrap();
    assert_eq!(req.task_type_id, "factor-analysis");
    assert!(req.parameters.is_none());

    let req: LaunchRequest = serde_json::from_value(json!({
      "taskTypeId": "time-series",
      "parameters": {"anime": "你的名字"}
    })).unwrap();
    assert_eq!(req.parameters.unwrap()["anime"], "你的名字");
  }

  #[test]
  fn terminal_statuses() {
    assert!(!TaskStatus::Queued.is_terminal());
    assert!(!TaskStatus::Running.is_terminal());
    assert!(TaskStatus::Completed.is_terminal());
    assert!(TaskStatus::Error.is_terminal());
    assert!(TaskStatus::Cancelled.is_terminal());
  }
}
