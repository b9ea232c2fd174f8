//! PostgreSQL setup, connection helpers, and the report queries.

use sqlx::postgres::{PgConnectOptions, PgSslMode};
use sqlx::{Executor, PgPool, Postgres};
use std::str::FromStr;
use tourdb_common::config::DatabaseConfig;
use tourdb_common::error::{TourdbError, TourdbResult};

/// Build connect options from config.
///
/// A `sslmode` in the URL is honoured as written. Otherwise TLS is required,
/// and the certificate is only verified when `verify_certificates` is set.
pub fn connect_options(config: &DatabaseConfig) -> TourdbResult<PgConnectOptions> {
    let url = config
        .url
        .as_deref()
        .ok_or_else(TourdbError::missing_database_url)?;

    let options = PgConnectOptions::from_str(url).map_err(|e| TourdbError::Configuration {
        message: format!("invalid connection string: {}", describe(&e)),
    })?;

    if names_ssl_mode(url) {
        return Ok(options);
    }

    let ssl_mode = if config.verify_certificates {
        PgSslMode::VerifyFull
    } else {
        PgSslMode::Require
    };
    Ok(options.ssl_mode(ssl_mode))
}

fn names_ssl_mode(url: &str) -> bool {
    url::Url::parse(url)
        .map(|parsed| {
            parsed
                .query_pairs()
                .any(|(key, _)| key == "sslmode" || key == "ssl-mode")
        })
        .unwrap_or(false)
}

/// Health check — verify the database is reachable.
pub async fn health_check(pool: &PgPool) -> bool {
    sqlx::query("SELECT 1").execute(pool).await.is_ok()
}

/// Names of all tables and views in the `public` schema, ascending.
pub async fn list_public_tables<'e, E>(executor: E) -> Result<Vec<String>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar::<_, String>(
        r#"
        SELECT table_name::text
        FROM information_schema.tables
        WHERE table_schema = 'public'
        ORDER BY table_name
        "#,
    )
    .fetch_all(executor)
    .await
}

/// `SELECT COUNT(*)` of one table. Fails if the table does not exist.
pub async fn count_rows<'e, E>(executor: E, table: &str) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let sql = format!("SELECT COUNT(*) FROM {}", quote_ident(table));
    sqlx::query_scalar::<_, i64>(&sql).fetch_one(executor).await
}

/// Quote an identifier for interpolation into SQL text.
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// The message a client should see: the server's own text for database
/// errors, the driver's description otherwise.
pub fn describe(err: &sqlx::Error) -> String {
    match err {
        sqlx::Error::Database(db) => db.message().to_string(),
        other => other.to_string(),
    }
}

fn is_transport_failure(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
    )
}

/// Errors raised while opening or acquiring a connection.
pub fn connection_error(err: sqlx::Error) -> TourdbError {
    TourdbError::Connection {
        message: describe(&err),
    }
}

/// Errors raised by the schema batch. Transport failures stay connection errors.
pub fn execution_error(err: sqlx::Error) -> TourdbError {
    if is_transport_failure(&err) {
        return connection_error(err);
    }
    TourdbError::SchemaExecution {
        message: describe(&err),
    }
}

/// Errors raised by the follow-up table and count queries.
pub fn reporting_error(err: sqlx::Error) -> TourdbError {
    if is_transport_failure(&err) {
        return connection_error(err);
    }
    TourdbError::Reporting {
        message: describe(&err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: Option<&str>, verify: bool) -> DatabaseConfig {
        DatabaseConfig {
            url: url.map(str::to_string),
            verify_certificates: verify,
            max_connections: 5,
            acquire_timeout_secs: 10,
        }
    }

    #[test]
    fn quote_ident_escapes_quotes() {
        assert_eq!(quote_ident("users"), "\"users\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn tls_required_without_verification_by_default() {
        let opts = connect_options(&config(Some("postgres://u:p@localhost:5432/app"), false)).unwrap();
        assert!(matches!(opts.get_ssl_mode(), PgSslMode::Require));
    }

    #[test]
    fn verification_flag_selects_verify_full() {
        let opts = connect_options(&config(Some("postgres://u:p@localhost:5432/app"), true)).unwrap();
        assert!(matches!(opts.get_ssl_mode(), PgSslMode::VerifyFull));
    }

    #[test]
    fn url_sslmode_wins() {
        let opts = connect_options(&config(
            Some("postgres://u:p@localhost:5432/app?sslmode=disable"),
            true,
        ))
        .unwrap();
        assert!(matches!(opts.get_ssl_mode(), PgSslMode::Disable));
    }

    #[test]
    fn missing_url_is_configuration_error() {
        let err = connect_options(&config(None, false)).unwrap_err();
        assert!(matches!(err, TourdbError::Configuration { .. }));
    }

    #[test]
    fn transport_failures_are_connection_errors() {
        assert!(matches!(
            execution_error(sqlx::Error::PoolTimedOut),
            TourdbError::Connection { .. }
        ));
        assert!(matches!(
            reporting_error(sqlx::Error::RowNotFound),
            TourdbError::Reporting { .. }
        ));
    }
}
