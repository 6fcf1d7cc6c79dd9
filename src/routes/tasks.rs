use warp::Filter;
use tracing::{info, warn};
use crate::models::LaunchRequest;
use crate::registry::TaskRegistry;
use super::with_registry;

pub fn task_routes(registry: TaskRegistry) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
  list_route(registry.clone())
    .or(launch_route(registry.clone()))
    .or(status_route(registry.clone()))
    .or(cancel_route(registry))
}

fn list_route(registry: TaskRegistry) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
  warp::path!("api" / "analysis" / "tasks")
    .and(warp::get())
    .and(with_registry(registry))
    .map(|registry: TaskRegistry| warp::reply::json(&registry.list_task_types()))
}

fn launch_route(registry: TaskRegistry) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
  warp::path!("api" / "analysis" / "tasks")
    .and(warp::post())
    .and(warp::body::json())
    .and(with_registry(registry))
    .and_then(handle_launch)
}

fn status_route(registry: TaskRegistry) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
  warp::path!("api" / "analysis" / "tasks" / String)
    .and(warp::get())
    .and(with_registry(registry))
    .and_then(handle_status)
}

fn cancel_route(registry: TaskRegistry) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
  warp::path!("api" / "analysis" / "tasks" / String)
    .and(warp::delete())
    .and(with_registry(registry))
    .and_then(handle_cancel)
}

async fn handle_launch(request: LaunchRequest, registry: TaskRegistry) -> Result<impl warp::Reply, warp::Rejection> {
  let response = registry
    .launch(&request.task_type_id, request.parameters)
    .await
    .map_err(|e| {
      warn!("Launch rejected: {}", e);
      warp::reject::custom(e)
    })?;
  info!("Instance {} accepted", response.instance_id);
  Ok(warp::reply::json(&response))
}

async fn handle_status(instance_id: String, registry: TaskRegistry) -> Result<impl warp::Reply, warp::Rejection> {
  let instance = registry.get(&instance_id).await.map_err(warp::reject::custom)?;
  Ok(warp::reply::json(&instance))
}

async fn handle_cancel(instance_id: String, registry: TaskRegistry) -> Result<impl warp::Reply, warp::Rejection> {
  let instance = registry.cancel(&instance_id).await.map_err(|e| {
    warn!("Cancel rejected: {}", e);
    warp::reject::custom(e)
  })?;
  Ok(warp::reply::json(&instance))
}
