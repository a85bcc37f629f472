use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use common::sms::{HttpSmsClient, NoopSmsSender, SmsSender};
use configs::AppConfig;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tracing::info;

use crate::errors::StartupError;
use crate::observability::init_metrics;
use crate::routes;
use crate::state::{AppState, Repositories};

fn build_sms(cfg: &configs::SmsConfig) -> Arc<dyn SmsSender> {
    if cfg.enabled {
        Arc::new(HttpSmsClient::new(&cfg.endpoint, &cfg.api_key, &cfg.sender_id))
    } else {
        Arc::new(NoopSmsSender)
    }
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    let port = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()).unwrap_or(cfg.server.port);
    format!("{}:{}", cfg.server.host, port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", cfg.server.host, port))
}

/// Public entry: load config, connect, migrate, build the app and serve.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;

    common::env::ensure_env(&cfg.media.dir).await?;

    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    migration::Migrator::up(&db, None).await.context("running migrations")?;
    info!(event = "migrations_applied", "database schema up to date");

    init_metrics();
    let state = AppState::new(Repositories::seaorm(db, &cfg), build_sms(&cfg.sms), &cfg);
    let app = routes::build_router(state);

    let addr = bind_addr(&cfg)?;
    info!(%addr, sms = cfg.sms.enabled, "starting autoease server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
