//! Memo authentication service
//!
//! An actix-web service backed by a PostgreSQL connection pool. It currently
//! exposes a single `/health` endpoint; the pool manager in [`postgres`] is the
//! shared foundation for the repositories that will serve authentication data.

pub mod config;
pub mod health;
pub mod logging;
pub mod postgres;
pub mod repository;
pub mod server;
pub mod types;
pub mod user;

pub use postgres::{Database, HealthMetrics};
pub use types::{ConfigError, DatabaseError, StartupError};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
