//! Backend entry-point: loads settings, applies migrations and serves the clinic pages.

mod server;

use std::ffi::OsString;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use clinic_backend::inbound::http::health::HealthState;
use clinic_backend::inbound::http::session_config::{
    BuildMode, key_fingerprint, session_settings_from_env,
};
use clinic_backend::outbound::persistence::{DbPool, run_pending_migrations};
use clinic_backend::settings::AppSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let args: Vec<OsString> = std::env::args_os().collect();
    let settings = AppSettings::load_from_iter(args)
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(|e| std::io::Error::other(format!("invalid session configuration: {e}")))?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        cookie_secure = session.cookie_secure,
        "session key loaded"
    );

    let pool_config = settings
        .pool_config()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let applied = run_pending_migrations(pool_config.database_url())
        .await
        .map_err(|e| std::io::Error::other(format!("database migration failed: {e}")))?;
    info!(applied, "database schema up to date");

    let pool = DbPool::new(pool_config)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::other(format!("invalid CLINIC_BIND_ADDR: {e}")))?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
        pool,
    );
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}
