//! Backend entry-point: loads configuration, wires adapters and serves the
//! REST API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use pressroom::inbound::http::health::HealthState;
use pressroom::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use pressroom::settings::{
    BuildMode, ServerSettings, secret_fingerprint, token_settings_from_env,
};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    color_eyre::install().map_err(|e| std::io::Error::other(e.to_string()))?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let tokens = token_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(|e| std::io::Error::other(format!("invalid token configuration: {e}")))?;
    info!(
        fingerprint = %secret_fingerprint(&tokens),
        ttl_secs = tokens.ttl().as_secs(),
        "token signing configured"
    );

    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let mut config = ServerConfig::new(bind_addr, tokens);
    if let Some(database_url) = settings.database_url() {
        run_pending_migrations(database_url)
            .await
            .map_err(std::io::Error::other)?;
        let max_size = settings.pool_max_size().map_err(std::io::Error::other)?;
        let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(max_size))
            .await
            .map_err(|e| std::io::Error::other(format!("database pool: {e}")))?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "server listening");
    server.await
}
