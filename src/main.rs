use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lead_pipeline::config::{load_config, Config};
use lead_pipeline::database::create_db_pool;
use lead_pipeline::models::{PipelineApp, Result};
use tokio::signal;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let config = match load_config("config.yml").await {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config.yml: {}. Using defaults.", e);
            Config::default()
        }
    };

    // Setup logging
    std::env::set_var(
        "RUST_LOG",
        format!("lead_pipeline={},rocket=warn", config.logging.level),
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("lead_pipeline=info".parse().unwrap()),
        )
        .with_max_level(tracing::Level::INFO)
        .init();

    // Initialize database
    info!("Initializing database...");
    let db_pool = create_db_pool(&config.database.path).await?;

    // Initialize and run the interactive app
    let app = PipelineApp::new(config, db_pool).await?;

    // Ctrl+C cancels an in-flight send batch between leads; already-committed
    // leads keep their last status.
    let cancel = app.cancel.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, stopping after the current lead...");
            cancel.cancel();
        }
    });

    app.run().await
}
