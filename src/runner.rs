use std::time::Duration;
use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, warn};
use crate::catalog;
use crate::error::RunError;
use crate::models::Parameters;
use crate::registry::TaskRegistry;

/// Artificial processing time before an instance settles. Fixed on purpose.
pub const COMPLETION_DELAY: Duration = Duration::from_millis(100);

/// Schedules the single completion job for an instance. Returns immediately.
pub fn spawn(registry: TaskRegistry, instance_id: String, task_type_id: String, parameters: Option<Parameters>) {
  tokio::spawn(async move {
    sleep(COMPLETION_DELAY).await;
    let outcome = compute(&task_type_id, parameters.as_ref());
    if let Err(e) = &outcome {
      warn!("Task {} failed: {}", instance_id, e);
    }
    debug!("Task {} settling after {:?}", instance_id, COMPLETION_DELAY);
    registry.settle(&instance_id, outcome).await;
  });
}

/// Canned result for a task type. Pure in `task_type_id` and `parameters`.
pub fn compute(task_type_id: &str, parameters: Option<&Parameters>) -> Result<Value, RunError> {
  let result = match task_type_id {
    catalog::FACTOR_ANALYSIS => serde_json::to_value(catalog::influence_factors())?,
    catalog::SENTIMENT_CORRELATION => serde_json::to_value(catalog::sentiment_correlation())?,
    catalog::TIME_SERIES => {
      let anime = forecast_anime(parameters)?;
      serde_json::to_value(catalog::forecast(&anime))?
    }
    catalog::LOCATION_CLUSTERING => serde_json::to_value(catalog::location_clusters())?,
    other => return Err(RunError::Unsupported(other.to_string())),
  };
  Ok(result)
}

fn forecast_anime(parameters: Option<&Parameters>) -> Result<String, RunError> {
  let invalid = |reason: &str| RunError::InvalidParameter {
    name: "anime".into(),
    reason: reason.into(),
  };
  match parameters.and_then(|p| p.get("anime")) {
    None | Some(Value::Null) => Ok(catalog::DEFAULT_FORECAST_ANIME.into()),
    Some(Value::String(s)) if s.is_empty() => Ok(catalog::DEFAULT_FORECAST_ANIME.into()),
    Some(Value::String(s)) => Ok(s.clone()),
    Some(_) => Err(invalid("expected a string")),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn params(value: Value) -> Parameters {
    value.as_object().cloned().unwrap()
  }

  #[test]
  fn factor_analysis_returns_catalog() {
    let result = compute(catalog::FACTOR_ANALYSIS, None).unwrap();
    assert_eq!(result, serde_json::to_value(catalog::influence_factors()).unwrap());
  }

  #[test]
  fn time_series_uses_anime_parameter() {
    let p = params(json!({"anime": "你的名字", "horizon": 12}));
    let result = compute(catalog::TIME_SERIES, Some(&p)).unwrap();
    assert_eq!(result["anime"], "你的名字");
    assert_eq!(result["dates"].as_array().unwrap().len(), 6);
  }

  #[test]
  fn time_series_defaults_missing_or_empty_anime() {
    for p in [None, Some(params(json!({"anime": ""}))), Some(params(json!({"anime": null})))] {
      let result = compute(catalog::TIME_SERIES, p.as_ref()).unwrap();
      assert_eq!(result["anime"], catalog::DEFAULT_FORECAST_ANIME);
    }
  }

  #[test]
  fn time_series_echoes_titles_verbatim() {
    let titles = ["Fate/Zero", "Steins;Gate", "《你的名字》", "JoJo's Bizarre Adventure", "Love Live! (2013)", "<script>"];
    for title in titles {
      let p = params(json!({"anime": title}));
      let result = compute(catalog::TIME_SERIES, Some(&p)).unwrap();
      assert_eq!(result["anime"], title);
    }
  }

  #[test]
  fn time_series_rejects_non_string_anime() {
    for bad in [json!(42), json!(["a"]), json!({"title": "x"}), json!(true)] {
      let p = params(json!({"anime": bad}));
      let err = compute(catalog::TIME_SERIES, Some(&p)).unwrap_err();
      assert!(matches!(err, RunError::InvalidParameter { ref name, .. } if name == "anime"));
    }
  }

  #[test]
  fn sentiment_correlation_summary() {
    let result = compute(catalog::SENTIMENT_CORRELATION, None).unwrap();
    assert_eq!(result["correlation"], 0.78);
    assert_eq!(result["factors"], json!([
      {"sentiment": "positive", "correlation": 0.85},
      {"sentiment": "neutral", "correlation": 0.32},
      {"sentiment": "negative", "correlation": -0.45},
    ]));
    assert_eq!(result["analysis"], "正面情感与访问热度呈强正相关，负面情感与访问热度呈中等负相关");
  }

  #[test]
  fn unknown_type_is_an_error() {
    let err = compute("trend-mining", None).unwrap_err();
    assert!(matches!(err, RunError::Unsupported(ref id) if id == "trend-mining"));
  }

  #[test]
  fn cluster_report_has_three_regions() {
    let result = compute(catalog::LOCATION_CLUSTERING, None).unwrap();
    assert_eq!(result["clusters"].as_array().unwrap().len(), 3);
    assert_eq!(result["clusters"][0]["center"], json!([35.6895, 139.6917]));
  }
}
