use anyhow::Context;
use warp::Filter;
use tracing::info;
use tracing_subscriber::EnvFilter;
use pilgrim::{config::Config, registry::TaskRegistry, routes::api};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();
  let config = Config::from_env();
  let registry = TaskRegistry::new();

  let cors = warp::cors()
    .allow_any_origin()
    .allow_methods(vec!["GET", "POST", "DELETE"])
    .allow_header("content-type");
  let app = api(registry).with(cors);

  let (addr, server) = warp::serve(app)
    .try_bind_with_graceful_shutdown((config.host, config.server_port), async {
      let _ = tokio::signal::ctrl_c().await;
      info!("Shutdown signal received");
    })
    .with_context(|| format!("failed to bind {}:{}", config.host, config.server_port))?;

  info!("Listening on {}", addr);
  server.await;
  Ok(())
}
