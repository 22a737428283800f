//! Readiness checks

use serde::Serialize;
use std::time::{Duration, Instant};

use crate::repositories::Stores;

/// Status of an individual dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Unhealthy,
}

/// Result of a single dependency check
#[derive(Debug, Clone, Serialize)]
pub struct ServiceHealth {
    /// Name of the dependency
    pub name: &'static str,
    pub status: ServiceStatus,
    /// Response time in milliseconds
    pub response_time_ms: u64,
    /// Error message if unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregated readiness response
#[derive(Debug, Clone, Serialize)]
pub struct HealthCheckResponse {
    pub status: ServiceStatus,
    pub services: Vec<ServiceHealth>,
    /// API version
    pub version: &'static str,
}

impl HealthCheckResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == ServiceStatus::Healthy
    }
}

fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Checks the storage backend the resolvers depend on
#[derive(Clone)]
pub struct HealthService {
    stores: Stores,
}

impl HealthService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    /// Run all readiness checks
    pub async fn check_all(&self) -> HealthCheckResponse {
        let started = Instant::now();
        let storage = match self.stores.ping().await {
            Ok(()) => ServiceHealth {
                name: self.stores.backend_name(),
                status: ServiceStatus::Healthy,
                response_time_ms: millis(started.elapsed()),
                error: None,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Storage readiness check failed");
                ServiceHealth {
                    name: self.stores.backend_name(),
                    status: ServiceStatus::Unhealthy,
                    response_time_ms: millis(started.elapsed()),
                    error: Some("storage unreachable".to_string()),
                }
            }
        };

        let status = if storage.status == ServiceStatus::Healthy {
            ServiceStatus::Healthy
        } else {
            ServiceStatus::Unhealthy
        };

        HealthCheckResponse {
            status,
            services: vec![storage],
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}
