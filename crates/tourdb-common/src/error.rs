//! Centralized error types for tourdb.
//!
//! Uses `thiserror` for the taxonomy of schema-provisioning failures and renders
//! them in the `{success: false, error}` shape the apply endpoint promises.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::path::PathBuf;

/// Every failure the applier or the status server can report.
#[derive(Debug, thiserror::Error)]
pub enum TourdbError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Connection error: {message}")]
    Connection { message: String },

    #[error("Cannot read schema file {}: {message}", path.display())]
    FileAccess { path: PathBuf, message: String },

    #[error("Schema execution failed: {message}")]
    SchemaExecution { message: String },

    #[error("Schema report query failed: {message}")]
    Reporting { message: String },
}

/// JSON error response body sent to clients.
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

impl TourdbError {
    pub fn missing_database_url() -> Self {
        Self::Configuration {
            message: "DATABASE_URL not found in environment (DATABASE_PUBLIC_URL also unset)"
                .into(),
        }
    }

    /// Map error to HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Configuration { .. }
            | Self::Connection { .. }
            | Self::FileAccess { .. }
            | Self::SchemaExecution { .. }
            | Self::Reporting { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Error code string for logs and programmatic handling.
    pub fn error_code(&self) -> &str {
        match self {
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::Connection { .. } => "CONNECTION_ERROR",
            Self::FileAccess { .. } => "FILE_ACCESS_ERROR",
            Self::SchemaExecution { .. } => "SCHEMA_EXECUTION_ERROR",
            Self::Reporting { .. } => "REPORTING_ERROR",
        }
    }

    /// The underlying message without the category prefix. For SQL failures
    /// this is the database's own error text.
    pub fn client_message(&self) -> String {
        match self {
            Self::FileAccess { .. } => self.to_string(),
            Self::Configuration { message }
            | Self::Connection { message }
            | Self::SchemaExecution { message }
            | Self::Reporting { message } => message.clone(),
        }
    }
}

impl IntoResponse for TourdbError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::error!(code = self.error_code(), "{self}");

        let body = ErrorResponse {
            success: false,
            error: self.client_message(),
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Convenience type alias for Results using TourdbError.
pub type TourdbResult<T> = Result<T, TourdbError>;
