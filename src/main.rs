mod config;
mod routes;

use config::{HostConfig, HostError};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "learnmart host failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), HostError> {
    let config = HostConfig::from_env()?;
    let (app, addr) = routes::app(&config)?;

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(HostError::Bind)?;
    tracing::info!(%addr, "learnmart listening");
    axum::serve(listener, app).await.map_err(HostError::Serve)
}
