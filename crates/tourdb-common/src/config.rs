//! Application configuration loaded from environment variables and config files.
//!
//! Supports `.env` files for development and environment variables for production.
//! Config precedence: `DATABASE_URL` / `DATABASE_PUBLIC_URL` / `PORT` / `HOST` >
//! `TOURDB__*` env vars > .env file > tourdb.toml > defaults

use serde::Deserialize;
use std::path::PathBuf;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Preferred connection string variable.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
/// Fallback connection string variable (public proxy URL on hosted platforms).
pub const DATABASE_PUBLIC_URL_VAR: &str = "DATABASE_PUBLIC_URL";

/// Variables reported by startup diagnostics and the unconfigured-mode page.
/// Secret variables are only ever reported as present or absent.
const DIAGNOSTIC_VARS: &[(&str, bool)] = &[
    (DATABASE_URL_VAR, true),
    (DATABASE_PUBLIC_URL_VAR, true),
    ("PORT", false),
    ("HOST", false),
    ("RUST_LOG", false),
    ("RAILWAY_ENVIRONMENT", false),
    ("RAILWAY_PROJECT_NAME", false),
    ("RAILWAY_SERVICE_NAME", false),
];

/// Get the global application configuration.
///
/// # Panics
/// Panics if config has not been initialized via [`init`].
pub fn get() -> &'static AppConfig {
    CONFIG
        .get()
        .expect("Config not initialized. Call tourdb_common::config::init() first.")
}

/// Initialize the global configuration from the process environment.
///
/// Should be called once at startup. Later calls return the first configuration.
pub fn init() -> Result<&'static AppConfig, config::ConfigError> {
    // Load .env file if present (development)
    let _ = dotenvy::dotenv();

    let app_config = load(&|key| std::env::var(key).ok())?;
    Ok(CONFIG.get_or_init(|| app_config))
}

/// Build a configuration without touching the global, reading the unprefixed
/// platform variables through `lookup`.
pub fn load(lookup: &dyn Fn(&str) -> Option<String>) -> Result<AppConfig, config::ConfigError> {
    let database_url = resolve_database_url(
        lookup(DATABASE_URL_VAR),
        lookup(DATABASE_PUBLIC_URL_VAR),
    );

    let cfg = config::Config::builder()
        // Defaults
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("database.verify_certificates", false)?
        .set_default("database.max_connections", 5)?
        .set_default("database.acquire_timeout_secs", 10)?
        .set_default("schema.path", "database/schema.sql")?
        .set_default("logging.json", false)?
        // Optional config file
        .add_source(config::File::with_name("tourdb").required(false))
        // Environment variables (TOURDB__SERVER__PORT, TOURDB__SCHEMA__PATH, etc.)
        .add_source(
            config::Environment::with_prefix("TOURDB")
                .separator("__")
                .try_parsing(true),
        )
        // Platform variables win over everything else
        .set_override_option("database.url", database_url)?
        .set_override_option("server.port", non_empty(lookup("PORT")))?
        .set_override_option("server.host", non_empty(lookup("HOST")))?
        .build()?;

    cfg.try_deserialize()
}

/// Pick the connection string: `DATABASE_URL` first, then `DATABASE_PUBLIC_URL`.
/// Blank values count as unset.
pub fn resolve_database_url(primary: Option<String>, fallback: Option<String>) -> Option<String> {
    non_empty(primary).or_else(|| non_empty(fallback))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Strip the password from a connection string so it can be shown or logged.
pub fn redact_url(raw: &str) -> String {
    match url::Url::parse(raw) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("****"));
            }
            parsed.to_string()
        }
        Err(_) => "<unparseable connection string>".to_string(),
    }
}

/// Presence (and, for non-secret variables, the value) of one environment variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVarStatus {
    pub name: &'static str,
    pub present: bool,
    /// Always `None` for secret variables.
    pub value: Option<String>,
}

/// Report the variables relevant to startup, hiding secret values.
pub fn diagnose_environment(lookup: &dyn Fn(&str) -> Option<String>) -> Vec<EnvVarStatus> {
    DIAGNOSTIC_VARS
        .iter()
        .map(|&(name, secret)| {
            let value = non_empty(lookup(name));
            EnvVarStatus {
                name,
                present: value.is_some(),
                value: if secret { None } else { value },
            }
        })
        .collect()
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub schema: SchemaConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL. `None` puts the server into unconfigured mode.
    #[serde(default)]
    pub url: Option<String>,
    /// Verify the server certificate chain and host name. When false the
    /// connection is still encrypted unless the URL names its own `sslmode`.
    pub verify_certificates: bool,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// Connection target with the password masked, for display.
    pub fn redacted_url(&self) -> Option<String> {
        self.url.as_deref().map(redact_url)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SchemaConfig {
    /// SQL file applied by `POST /api/apply-schema` and the `apply` command.
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Emit newline-delimited JSON instead of human-readable lines.
    pub json: bool,
}
