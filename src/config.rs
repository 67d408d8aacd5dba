//! Configuration management for memo_auth_service
//!
//! Settings come from the process environment, after the environment-specific
//! `.env.<environment>` file has been loaded. Optional values fall back to
//! defaults; a missing `DATABASE_URI` or an unknown environment tag is fatal.

use crate::types::ConfigError;
use log::LevelFilter;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_SERVICE_NAME: &str = "authService";
const DEFAULT_SERVICE_HOST: &str = "localhost";
const DEFAULT_SERVICE_PORT: u16 = 8000;
const DEFAULT_MAX_CONNS: usize = 25;
const DEFAULT_MIN_CONNS: usize = 5;
const DEFAULT_MAX_CONN_LIFETIME: Duration = Duration::from_secs(60 * 60);
const DEFAULT_MAX_CONN_IDLE_TIME: Duration = Duration::from_secs(30 * 60);
const DEFAULT_HEALTH_CHECK_PERIOD: Duration = Duration::from_secs(60);

/// Runtime environment the service is deployed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Production,
    Staging,
    Testing,
    #[default]
    Development,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Staging => "staging",
            Environment::Testing => "testing",
            Environment::Development => "development",
        }
    }

    /// Default log level for this environment
    pub fn log_level(&self) -> LevelFilter {
        match self {
            Environment::Production | Environment::Staging => LevelFilter::Info,
            Environment::Testing => LevelFilter::Warn,
            Environment::Development => LevelFilter::Debug,
        }
    }

    /// Whether logs should be emitted as JSON lines
    pub fn json_logs(&self) -> bool {
        matches!(self, Environment::Production | Environment::Staging)
    }

    /// Name of the dotenv file loaded for this environment
    pub fn dotenv_file(&self) -> PathBuf {
        PathBuf::from(format!(".env.{}", self.as_str()))
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Environment::Production),
            "staging" => Ok(Environment::Staging),
            "testing" => Ok(Environment::Testing),
            "development" => Ok(Environment::Development),
            _ => Err(ConfigError::InvalidEnvironment(s.to_string())),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LevelFilter,
    pub json: bool,
    /// Optional file receiving a JSON copy of every record
    pub file: Option<PathBuf>,
}

/// Service identity and bind address
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub name: String,
    pub host: String,
    pub port: u16,
}

/// Connection pool configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub uri: String,
    pub max_conns: usize,
    pub min_conns: usize,
    pub max_conn_lifetime: Duration,
    pub max_conn_idle_time: Duration,
    /// Interval of the pool maintenance task
    pub health_check_period: Duration,
}

impl DatabaseConfig {
    /// Pool configuration for `uri` with default sizing and lifetimes
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            max_conns: DEFAULT_MAX_CONNS,
            min_conns: DEFAULT_MIN_CONNS,
            max_conn_lifetime: DEFAULT_MAX_CONN_LIFETIME,
            max_conn_idle_time: DEFAULT_MAX_CONN_IDLE_TIME,
            health_check_period: DEFAULT_HEALTH_CHECK_PERIOD,
        }
    }

    /// Check the pool sizing and timing invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.uri.is_empty() {
            return Err(ConfigError::MissingVar("DATABASE_URI"));
        }
        if self.max_conns == 0 {
            return Err(ConfigError::Invalid {
                key: "DATABASE_MAX_CONNS",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.min_conns == 0 || self.min_conns > self.max_conns {
            return Err(ConfigError::Invalid {
                key: "DATABASE_MIN_CONNS",
                message: format!(
                    "must be between 1 and DATABASE_MAX_CONNS ({}), got {}",
                    self.max_conns, self.min_conns
                ),
            });
        }

        let durations = [
            ("DATABASE_MAX_CONN_LIFETIME", self.max_conn_lifetime),
            ("DATABASE_MAX_CONN_IDLE_TIME", self.max_conn_idle_time),
            ("DATABASE_HEALTH_CHECK_PERIOD", self.health_check_period),
        ];
        for (key, value) in durations {
            if value.is_zero() {
                return Err(ConfigError::Invalid {
                    key,
                    message: "must be a non-zero duration".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Complete service settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub environment: Environment,
    pub log: LogConfig,
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
}

impl Settings {
    /// Load settings: detect the environment, load its dotenv file, then read
    /// the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let environment = load_environment(env::var("ENVIRONMENT").ok())?;

        let path = environment.dotenv_file();
        dotenvy::from_filename(&path).map_err(|source| ConfigError::Dotenv {
            path,
            source,
        })?;

        Self::from_env()
    }

    /// Read settings from the process environment only
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let environment = load_environment(lookup("ENVIRONMENT"))?;
        let service = load_service_config(&lookup);
        let database = load_database_config(&lookup)?;
        let log = LogConfig {
            level: environment.log_level(),
            json: environment.json_logs(),
            file: lookup("LOG_FILE").map(PathBuf::from),
        };

        let settings = Settings {
            environment,
            log,
            service,
            database,
        };
        validate_settings(&settings)?;
        Ok(settings)
    }

    /// Address the HTTP server binds to
    pub fn bind_address(&self) -> (String, u16) {
        (self.service.host.clone(), self.service.port)
    }
}

fn load_environment(value: Option<String>) -> Result<Environment, ConfigError> {
    match value.filter(|v| !v.is_empty()) {
        Some(value) => value.parse(),
        None => Ok(Environment::default()),
    }
}

fn load_service_config(lookup: &impl Fn(&str) -> Option<String>) -> ServiceConfig {
    ServiceConfig {
        name: lookup("SERVICE_NAME").unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
        host: lookup("SERVICE_HOST").unwrap_or_else(|| DEFAULT_SERVICE_HOST.to_string()),
        port: lookup("SERVICE_PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_SERVICE_PORT),
    }
}

fn load_database_config(
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<DatabaseConfig, ConfigError> {
    let uri = lookup("DATABASE_URI").ok_or(ConfigError::MissingVar("DATABASE_URI"))?;

    Ok(DatabaseConfig {
        uri,
        max_conns: lookup("DATABASE_MAX_CONNS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_CONNS),
        min_conns: lookup("DATABASE_MIN_CONNS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MIN_CONNS),
        max_conn_lifetime: lookup("DATABASE_MAX_CONN_LIFETIME")
            .and_then(|s| parse_duration(&s))
            .unwrap_or(DEFAULT_MAX_CONN_LIFETIME),
        max_conn_idle_time: lookup("DATABASE_MAX_CONN_IDLE_TIME")
            .and_then(|s| parse_duration(&s))
            .unwrap_or(DEFAULT_MAX_CONN_IDLE_TIME),
        health_check_period: lookup("DATABASE_HEALTH_CHECK_PERIOD")
            .and_then(|s| parse_duration(&s))
            .unwrap_or(DEFAULT_HEALTH_CHECK_PERIOD),
    })
}

/// Parse durations such as `1h`, `30m`, `1h30m` or `250ms`
fn parse_duration(value: &str) -> Option<Duration> {
    humantime::parse_duration(value.trim()).ok()
}

fn validate_settings(settings: &Settings) -> Result<(), ConfigError> {
    if settings.service.port == 0 {
        return Err(ConfigError::Invalid {
            key: "SERVICE_PORT",
            message: "must be between 1 and 65,535".to_string(),
        });
    }

    settings.database.validate()
}

/// Hide credentials in a connection string before it is logged
pub fn mask_sensitive_url(url: &str) -> String {
    if let Some(at_pos) = url.rfind('@') {
        let (before_at, after_at) = url.split_at(at_pos);
        if let Some(protocol_end) = before_at.find("://") {
            let protocol = &before_at[..protocol_end + 3];
            format!("{}***{}", protocol, after_at)
        } else {
            "***".to_string()
        }
    } else {
        url.to_string()
    }
}
