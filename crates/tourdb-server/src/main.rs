//! # tourdb
//!
//! Provisions the tour platform's PostgreSQL database:
//! - `tourdb apply` runs the schema file once, prints the resulting tables and seed counts, and exits
//! - `tourdb serve` (the default) runs the status server exposing the same operation over HTTP
//!
//! Exits non-zero when `apply` has no connection string or the schema run fails.

mod apply;
mod serve;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tourdb", version, about = "Tour platform database provisioning")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the status server (default)
    Serve,
    /// Apply the schema file once and report the resulting tables
    Apply {
        /// Schema file to apply [default: `schema.path` from config]
        #[arg(long, value_name = "PATH")]
        schema: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = tourdb_common::config::init()?;

    // Initialize tracing (structured logging)
    init_tracing(config.logging.json);

    tracing::info!("Starting tourdb v{}", env!("CARGO_PKG_VERSION"));
    log_environment();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve::run(config).await,
        Command::Apply { schema } => apply::run(config, schema).await,
    }
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tourdb=debug,tower_http=debug".into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Log the effective settings and which of the relevant environment variables
/// are present. Secret values are never logged.
fn log_environment() {
    let config = tourdb_common::config::get();
    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        schema = %config.schema.path.display(),
        database = config.database.redacted_url().as_deref().unwrap_or("<unset>"),
        "Effective configuration"
    );

    let lookup = |key: &str| std::env::var(key).ok();
    for var in tourdb_common::config::diagnose_environment(&lookup) {
        tracing::debug!(
            var = var.name,
            present = var.present,
            value = var.value.as_deref().unwrap_or("-"),
            "Environment"
        );
    }
}
