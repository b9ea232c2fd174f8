//! `tourdb serve` — the status server.

use std::net::SocketAddr;
use tourdb_api::{AppState, build_router, build_unconfigured_router};
use tourdb_common::config::{AppConfig, diagnose_environment};
use tourdb_db::Database;

pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    if !config.database.is_configured() {
        // Degraded mode: keep listening so the platform sees a live service,
        // but only the diagnostic page and health probe are served.
        tracing::error!("DATABASE_URL not found in environment; database endpoints disabled");
        let lookup = |key: &str| std::env::var(key).ok();
        let app = build_unconfigured_router(&diagnose_environment(&lookup));

        tracing::info!("Listening on http://{addr} (unconfigured)");
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        return Ok(());
    }

    let db = Database::connect_lazy(&config.database)?;
    let state = AppState::new(
        db.clone(),
        config.schema.path.clone(),
        config.database.redacted_url().unwrap_or_default(),
    );
    let app = build_router(state);

    tracing::info!("Listening on http://{addr}");
    tracing::info!("Database status: http://{addr}/api/db-status");
    tracing::info!(schema = %config.schema.path.display(), "Schema file for /api/apply-schema");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down...");
}
