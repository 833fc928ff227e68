pub mod api; // JSON API: router, handlers, server
pub mod config;
pub mod core_state;
pub mod db;
pub mod ids; // Prefixed random identifiers
pub mod models;
pub mod registry; // Registration, login and booking flows
pub mod validation;

use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Database error: {0}")]
    Core(#[from] core_state::CoreError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Load config, prepare the database, serve until Ctrl-C.
pub async fn run() -> Result<(), StartupError> {
    init_tracing();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = config::AppConfig::from_env()?;
    let core = Arc::new(core_state::CoreState::from_config(&config));

    // Fail fast on an unusable database file; also applies migrations.
    drop(core.open_db()?);
    tracing::info!(db_path = %core.db_path().display(), "Database ready");

    let mut server = api::start_server_on(core, config.bind_addr).await?;
    tracing::info!(addr = %server.addr, "Listening");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
    }

    server.shutdown();
    server.stopped().await;
    Ok(())
}
