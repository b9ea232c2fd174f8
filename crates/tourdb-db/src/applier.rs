//! Schema applier: execute the schema batch, then report the resulting tables
//! and seed row counts.
//!
//! Every entry point releases the connection it opened or acquired before
//! returning, whether the run succeeded or not.

use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::path::Path;
use std::time::Instant;
use tourdb_common::config::DatabaseConfig;
use tourdb_common::error::TourdbResult;
use tourdb_common::models::{ApplyReport, STAT_TABLES, SchemaStats};

use crate::postgres::{self, connection_error, execution_error, reporting_error};
use crate::schema::SchemaDocument;

/// Apply a schema using a caller-owned connection.
pub async fn apply(conn: &mut PgConnection, schema: &SchemaDocument) -> TourdbResult<ApplyReport> {
    let started = Instant::now();
    tracing::info!(
        path = %schema.path().display(),
        bytes = schema.sql().len(),
        "Applying database schema..."
    );

    Executor::execute(&mut *conn, sqlx::raw_sql(schema.sql()))
        .await
        .map_err(execution_error)?;
    tracing::info!("Schema applied");

    let report = report(conn).await?;
    tracing::info!(
        tables = report.tables.len(),
        categories = report.stats.categories,
        users = report.stats.users,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Schema report ready"
    );
    Ok(report)
}

/// Query the public table list and the seed table counts.
pub async fn report(conn: &mut PgConnection) -> TourdbResult<ApplyReport> {
    let tables = postgres::list_public_tables(&mut *conn)
        .await
        .map_err(reporting_error)?;

    let [categories_table, users_table] = STAT_TABLES;
    let categories = postgres::count_rows(&mut *conn, categories_table)
        .await
        .map_err(reporting_error)?;
    let users = postgres::count_rows(&mut *conn, users_table)
        .await
        .map_err(reporting_error)?;

    Ok(ApplyReport::new(tables, SchemaStats { categories, users }))
}

/// Read the schema file, then apply it on a pooled connection.
///
/// The file is read before a connection is acquired, so an unreadable file
/// never touches the pool. A failed run closes its connection instead of
/// returning it: the batch may have left a transaction open or aborted.
pub async fn apply_pooled(pool: &PgPool, schema_path: &Path) -> TourdbResult<ApplyReport> {
    let schema = SchemaDocument::load(schema_path).await?;
    let mut conn = pool.acquire().await.map_err(connection_error)?;

    let outcome = apply(&mut conn, &schema).await;
    if outcome.is_err() {
        conn.close_on_drop();
    }
    outcome
}

/// One-shot run used by the `apply` command: open a dedicated connection,
/// apply, report, close.
pub async fn apply_once(config: &DatabaseConfig, schema_path: &Path) -> TourdbResult<ApplyReport> {
    let options = postgres::connect_options(config)?;
    let schema = SchemaDocument::load(schema_path).await?;

    tracing::info!(
        database = config.redacted_url().as_deref().unwrap_or("<unset>"),
        "Connecting to PostgreSQL..."
    );
    let mut conn = PgConnection::connect_with(&options)
        .await
        .map_err(connection_error)?;
    tracing::info!("Connected to PostgreSQL");

    let outcome = apply(&mut conn, &schema).await;

    if let Err(e) = conn.close().await {
        tracing::warn!(error = %e, "Failed to close PostgreSQL connection cleanly");
    }
    outcome
}
