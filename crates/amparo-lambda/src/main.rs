use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use amparo_flows::FlowContext;
use amparo_storage::memory::MemoryStore;
use amparo_storage::s3::S3Store;

mod app;
mod config;
mod error;
mod middleware;
mod routes;
mod state;

use config::{Backend, Config};
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::from_env()?;
    let policy = config.load_policy()?;
    tracing::info!(
        backend = ?config.backend,
        taxonomy_version = policy.taxonomy.version(),
        "starting"
    );

    let flows = match config.backend {
        Backend::Memory => FlowContext::new(Arc::new(MemoryStore::new()), policy),
        Backend::S3 => {
            let client = amparo_storage::client::build_client().await;
            FlowContext::new(Arc::new(S3Store::new(client, config.bucket.clone())), policy)
        }
    };

    let state = AppState { flows };

    lambda_http::run(app::build_router(state))
        .await
        .map_err(|e| eyre::eyre!(e))
}
