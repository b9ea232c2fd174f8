//! # tourdb-db
//!
//! Database layer for tourdb:
//! - **postgres** — connection options, pooling, and the report queries
//! - **schema** — the SQL document applied to the database
//! - **applier** — the apply-and-report workflow shared by the CLI and the server

pub mod applier;
pub mod postgres;
pub mod schema;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tourdb_common::config::DatabaseConfig;
use tourdb_common::error::TourdbResult;

pub use schema::SchemaDocument;

/// Shared database state passed through Axum extractors.
#[derive(Clone)]
pub struct Database {
    pub pg: PgPool,
}

impl Database {
    /// Build a pool without opening any connection. Connections are made on
    /// first use, so the server can start while the database is unreachable.
    pub fn connect_lazy(config: &DatabaseConfig) -> TourdbResult<Self> {
        let options = postgres::connect_options(config)?;
        let pg = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_lazy_with(options);

        tracing::info!(
            max_connections = config.max_connections,
            database = config.redacted_url().as_deref().unwrap_or("<unset>"),
            "PostgreSQL pool ready (lazy)"
        );
        Ok(Self { pg })
    }

    /// Close every pooled connection and wait for them to be released.
    pub async fn close(&self) {
        tracing::info!("Closing PostgreSQL pool...");
        self.pg.close().await;
        tracing::info!("PostgreSQL pool closed");
    }
}
