use std::convert::Infallible;
use std::time::Duration;
use futures::stream;
use serde::Serialize;
use tokio::time::{interval, Interval, MissedTickBehavior};
use warp::Filter;
use tracing::error;
use warp::sse::Event;
use crate::models::TaskStatus;
use crate::registry::TaskRegistry;
use super::with_registry;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub fn events_route(registry: TaskRegistry) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
  warp::path!("api" / "analysis" / "tasks" / String / "events")
    .and(warp::get())
    .and(with_registry(registry))
    .and_then(handle_events)
}

struct Watch {
  registry: TaskRegistry,
  instance_id: String,
  ticker: Interval,
  last_status: Option<TaskStatus>,
  finished: bool,
}

async fn handle_events(instance_id: String, registry: TaskRegistry) -> Result<impl warp::Reply, warp::Rejection> {
  // Unknown ids are rejected up front rather than producing an empty stream.
  registry.get(&instance_id).await.map_err(warp::reject::custom)?;

  let mut ticker = interval(POLL_INTERVAL);
  ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
  let watch = Watch {
    registry,
    instance_id,
    ticker,
    last_status: None,
    finished: false,
  };

  let events = stream::unfold(watch, |mut watch| async move {
    if watch.finished {
      return None;
    }
    loop {
      watch.ticker.tick().await;
      let snapshot = watch.registry.get(&watch.instance_id).await.ok()?;
      if watch.last_status == Some(snapshot.status) {
        continue;
      }
      watch.last_status = Some(snapshot.status);
      watch.finished = snapshot.status.is_terminal();
      // A snapshot that cannot be encoded ends the stream.
      let event = status_event(&watch.instance_id, &snapshot)?;
      return Some((Ok::<_, Infallible>(event), watch));
    }
  });

  Ok(warp::sse::reply(warp::sse::keep_alive().stream(events)))
}

fn status_event<T: Serialize>(instance_id: &str, snapshot: &T) -> Option<Event> {
  match serde_json::to_string(snapshot) {
    Ok(data) => Some(Event::default().event("status").data(data)),
    Err(e) => {
      error!("Failed to encode snapshot of {}: {:?}", instance_id, e);
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  #[test]
  fn unencodable_snapshot_yields_no_event() {
    let snapshot: HashMap<(u8, u8), u8> = HashMap::from([((1, 2), 3)]);
    assert!(status_event("time-series-1", &snapshot).is_none());
  }

  #[test]
  fn encodes_snapshot_as_status_event() {
    let event = status_event("time-series-1", &serde_json::json!({"status": "running"})).unwrap();
    let rendered = event.to_string();
    assert!(rendered.contains("event:status"));
    assert!(rendered.contains("data:{\"status\":\"running\"}"));
  }
}
