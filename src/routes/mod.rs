use std::convert::Infallible;
use serde::Serialize;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};
use tracing::error;
use crate::error::TaskError;
use crate::registry::TaskRegistry;
pub mod tasks;
pub mod sse;

pub fn routes(
  registry: TaskRegistry
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
  health_route()
    .or(sse::events_route(registry.clone()))
    .or(tasks::task_routes(registry))
}

/// Full API with rejections turned into JSON error replies.
pub fn api(
  registry: TaskRegistry
) -> impl Filter<Extract = impl warp::Reply, Error = Infallible> + Clone {
  routes(registry).recover(handle_rejection)
}

fn health_route() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
  warp::path("health")
    .and(warp::path::end())
    .and(warp::get())
    .map(|| warp::reply::json(&serde_json::json!({ "status": "ok" })))
}

pub(crate) fn with_registry(registry: TaskRegistry) -> impl Filter<Extract = (TaskRegistry,), Error = Infallible> + Clone {
  warp::any().map(move || registry.clone())
}

#[derive(Serialize)]
struct ErrorBody {
  code: u16,
  message: String,
}

pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
  let (code, message) = if let Some(e) = err.find::<TaskError>() {
    let code = if e.is_not_found() { StatusCode::NOT_FOUND } else { StatusCode::CONFLICT };
    (code, e.to_string())
  } else if err.is_not_found() {
    (StatusCode::NOT_FOUND, "Not Found".to_string())
  } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
    (StatusCode::BAD_REQUEST, e.to_string())
  } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed".to_string())
  } else {
    error!("Unhandled rejection: {:?}", err);
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
  };

  let body = warp::reply::json(&ErrorBody { code: code.as_u16(), message });
  Ok(warp::reply::with_status(body, code))
}
