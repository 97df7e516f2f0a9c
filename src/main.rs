use std::sync::Arc;

use anyhow::{Context, Result};
use log::{error, info};
use tokio::{net::TcpListener, sync::broadcast};

use homepricer::{
    config::{self, Config},
    db,
    logger::setup_logger,
    pricing::LinearPipeline,
    web::{self, AppState},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger
    setup_logger()?;

    let config: Arc<Config> = Arc::new(config::read_config());

    if let Err(err) = serve(config).await {
        error!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

async fn serve(config: Arc<Config>) -> Result<()> {
    db::init_schema(&config).context("Storage is not reachable")?;

    let model = LinearPipeline::load(&config.model_path).context("Model artifact unavailable")?;

    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind http listener on {}", config.bind_address()))?;

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            let _ = shutdown_tx.send(());
        }
    });

    let state = AppState {
        config,
        model: Arc::new(model),
    };
    web::start_http_server(listener, state, shutdown_rx).await
}
