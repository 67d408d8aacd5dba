//! Error types for memo_auth_service
//!
//! Startup failures are fatal and end the process. Database failures raised while
//! serving a request are converted into a JSON error response instead.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid environment: {0}")]
    InvalidEnvironment(String),

    #[error("error loading {} file: {source}", path.display())]
    Dotenv {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("{0} environment variable is required")]
    MissingVar(&'static str),

    #[error("invalid value for {key}: {message}")]
    Invalid {
        key: &'static str,
        message: String,
    },
}

/// Errors raised by the connection pool manager
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Pool construction, initial ping and acquire failures
    #[error("{0}")]
    Connection(String),

    #[error("database health check failed: {0}")]
    HealthCheck(String),

    /// Begin and commit failures
    #[error("{0}")]
    Transaction(String),

    #[error("query failed: {0}")]
    Query(#[from] tokio_postgres::Error),
}

impl DatabaseError {
    pub fn is_connection(&self) -> bool {
        matches!(self, DatabaseError::Connection(_))
    }

    pub fn is_health_check(&self) -> bool {
        matches!(self, DatabaseError::HealthCheck(_))
    }
}

/// Body returned for any failed request
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub error: String,
}

impl ResponseError for DatabaseError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            status: "error",
            error: self.to_string(),
        })
    }
}

/// Application startup errors
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to load config: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to initialize database: {0}")]
    Database(#[from] DatabaseError),
    #[error("failed to start server: {0}")]
    ServerBind(#[from] std::io::Error),
}
