//! Backend entry-point: loads settings, prepares storage and signing keys,
//! then serves the REST API.

mod server;

use std::net::{IpAddr, SocketAddr};

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use mesto::inbound::http::health::HealthState;
use mesto::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{BuildMode, ServerConfig, ServerSettings, create_server, token_context_from_env};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(std::io::Error::other)?;
    let signing = token_context_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;

    let host: IpAddr = settings.host().parse().map_err(|e| {
        std::io::Error::other(format!("invalid host '{}': {e}", settings.host()))
    })?;
    let bind_addr = SocketAddr::new(host, settings.port());

    let mut config = ServerConfig::new(bind_addr, signing);
    if let Some(database_url) = settings.database_url.as_deref() {
        run_pending_migrations(database_url)
            .await
            .map_err(std::io::Error::other)?;
        let mut pool_config = PoolConfig::new(database_url);
        if let Some(max_size) = settings.pool_max_size {
            pool_config = pool_config.with_max_size(max_size);
        }
        let pool = DbPool::new(pool_config)
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}
