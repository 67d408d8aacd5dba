//! PostgreSQL access layer
//!
//! Pool construction, the [`Database`] pool manager and its health metrics.

pub mod config;
pub mod database;
pub mod metrics;

pub use database::{Database, PooledConnection, HEALTH_CHECK_TIMEOUT};
pub use metrics::HealthMetrics;
pub use tokio_postgres::Transaction;
