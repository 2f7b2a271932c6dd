//! HTTP server entry point.
//!
//! # Responsibility
//! - Read configuration, start logging and open the item store.
//! - Serve the habits router until Ctrl-C.

use anyhow::Context;
use clap::Parser;
use habits_api::{open_store, router, AppState, HeaderTenantResolver, ServerConfig};
use habits_core::{core_version, init_logging};
use log::{error, info};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(config.log_level(), config.log_dir.as_deref()).map_err(anyhow::Error::msg)?;

    let store = open_store(&config.db)
        .with_context(|| format!("failed to open item store at {}", config.db.display()))?;
    let tenants = HeaderTenantResolver::new(&config.tenant_header)
        .with_context(|| format!("invalid tenant header `{}`", config.tenant_header))?;
    let app = router(AppState::new(store, Arc::new(tenants)));

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(
        "event=server_start module=server status=ok version={} bind={} db={}",
        core_version(),
        config.bind,
        config.db.display()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(
            "event=server_stop module=server status=error error_code=signal_failed error={}",
            err
        );
        std::future::pending::<()>().await;
    }
}
