//! PostgreSQL connection pool configuration and setup
//!
//! Turns a [`DatabaseConfig`] into a deadpool-postgres [`Pool`]. Building the pool
//! does not open any connection; the first one is created on demand.

use crate::config::DatabaseConfig;
use crate::types::DatabaseError;
pub(crate) use deadpool_postgres::{
    Config, ManagerConfig, Pool, PoolConfig, RecyclingMethod, Runtime,
};
use std::time::Duration;
use tokio_postgres::{tls::MakeTlsConnect, NoTls, Socket};

/// Connect timeout used when the URI does not set `connect_timeout`
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Upper bound for returning a connection to the pool
const RECYCLE_TIMEOUT: Duration = Duration::from_secs(5);

/// Creates a PostgreSQL connection pool for `config` without TLS
pub fn create_pool(config: &DatabaseConfig) -> Result<Pool, DatabaseError> {
    create_pool_with_tls(config, NoTls)
}

/// Creates a PostgreSQL connection pool with TLS support
pub fn create_pool_with_tls<T>(config: &DatabaseConfig, tls: T) -> Result<Pool, DatabaseError>
where
    T: MakeTlsConnect<Socket> + Clone + Send + Sync + 'static,
    <T as MakeTlsConnect<Socket>>::TlsConnect: Send + Sync,
    <T as MakeTlsConnect<Socket>>::Stream: Send + Sync,
    <<T as MakeTlsConnect<Socket>>::TlsConnect as tokio_postgres::tls::TlsConnect<Socket>>::Future:
        Send,
{
    config.validate().map_err(|e| {
        DatabaseError::Connection(format!("invalid pool configuration: {e}"))
    })?;

    let connect_timeout = connect_timeout(&config.uri)?;

    let mut cfg = Config::new();
    cfg.url = Some(config.uri.clone());
    cfg.connect_timeout = Some(connect_timeout);
    cfg.manager = Some(ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    });

    let mut pool_config = PoolConfig::new(config.max_conns);
    pool_config.timeouts.create = Some(connect_timeout);
    pool_config.timeouts.recycle = Some(RECYCLE_TIMEOUT);
    cfg.pool = Some(pool_config);

    cfg.create_pool(Some(Runtime::Tokio1), tls)
        .map_err(|e| DatabaseError::Connection(format!("failed to create connection pool: {e}")))
}

/// Validate the URI and pick the connect timeout it asks for, if any
fn connect_timeout(uri: &str) -> Result<Duration, DatabaseError> {
    let pg_config: tokio_postgres::Config = uri
        .parse()
        .map_err(|e| DatabaseError::Connection(format!("error parsing database URI: {e}")))?;

    Ok(pg_config.get_connect_timeout().copied().unwrap_or(DEFAULT_CONNECT_TIMEOUT))
}
