use deadpool_postgres::Status;
use serde::{Deserialize, Serialize};

/// Point-in-time connection counts of the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetrics {
    pub total_connections: usize,
    pub acquired_connections: usize,
    pub idle_connections: usize,
}

impl From<Status> for HealthMetrics {
    fn from(status: Status) -> Self {
        Self {
            total_connections: status.size,
            acquired_connections: status.size.saturating_sub(status.available),
            idle_connections: status.available,
        }
    }
}

impl HealthMetrics {
    /// Report up to `held` acquired connections as idle instead
    pub fn with_idle_held(self, held: usize) -> Self {
        let held = held.min(self.acquired_connections);
        Self {
            acquired_connections: self.acquired_connections - held,
            idle_connections: self.idle_connections + held,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_from_pool_status() {
        let metrics = HealthMetrics::from(Status {
            max_size: 10,
            size: 8,
            available: 2,
            waiting: 0,
        });

        assert_eq!(metrics.total_connections, 8);
        assert_eq!(metrics.acquired_connections, 6);
        assert_eq!(metrics.idle_connections, 2);
    }

    #[test]
    fn test_held_connections_count_as_idle() {
        let metrics = HealthMetrics {
            total_connections: 3,
            acquired_connections: 2,
            idle_connections: 1,
        };

        let shifted = metrics.with_idle_held(1);
        assert_eq!(shifted.total_connections, 3);
        assert_eq!(shifted.acquired_connections, 1);
        assert_eq!(shifted.idle_connections, 2);

        // Never more than what is actually checked out.
        let capped = metrics.with_idle_held(5);
        assert_eq!(capped.acquired_connections, 0);
        assert_eq!(capped.idle_connections, 3);

        assert_eq!(metrics.with_idle_held(0), metrics);
    }

    #[test]
    fn test_metrics_serialize_camel_case() {
        let metrics = HealthMetrics {
            total_connections: 5,
            acquired_connections: 1,
            idle_connections: 4,
        };

        let json = serde_json::to_value(metrics).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "totalConnections": 5,
                "acquiredConnections": 1,
                "idleConnections": 4
            })
        );
    }
}
