//! Health Check System
//!
//! Liveness is a static `OK`; readiness pings the customer store.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use ci_attachments::CustomerImageService;
use ci_db::Database;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Health check status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }
}

/// Individual component health
#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Overall health report
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub components: Vec<ComponentHealth>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HealthReport {
    pub fn http_status(&self) -> StatusCode {
        match self.status {
            HealthStatus::Healthy => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Health checker configuration
#[derive(Debug, Clone)]
pub struct HealthConfig {
    /// Timeout for the store ping
    pub check_timeout: Duration,
    /// Cache duration for health results
    pub cache_duration: Duration,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            check_timeout: Duration::from_secs(5),
            cache_duration: Duration::from_secs(10),
        }
    }
}

struct CachedHealth {
    report: HealthReport,
    cached_at: Instant,
}

/// Health checker service
pub struct HealthChecker {
    config: HealthConfig,
    start_time: Instant,
    cache: RwLock<Option<CachedHealth>>,
    service: CustomerImageService,
    database: Option<Database>,
}

impl HealthChecker {
    pub fn new(config: HealthConfig, service: CustomerImageService) -> Self {
        Self {
            config,
            start_time: Instant::now(),
            cache: RwLock::new(None),
            service,
            database: None,
        }
    }

    /// Report pool statistics alongside the store check
    pub fn with_database(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }

    /// Get cached health or perform checks
    pub async fn check(&self) -> HealthReport {
        {
            let cache = self.cache.read().await;
            if let Some(ref cached) = *cache {
                if cached.cached_at.elapsed() < self.config.cache_duration {
                    debug!("Returning cached health report");
                    return cached.report.clone();
                }
            }
        }

        let report = self.perform_checks().await;

        {
            let mut cache = self.cache.write().await;
            *cache = Some(CachedHealth {
                report: report.clone(),
                cached_at: Instant::now(),
            });
        }

        report
    }

    async fn perform_checks(&self) -> HealthReport {
        let store = self.check_store().await;

        HealthReport {
            status: store.status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            components: vec![store],
            timestamp: chrono::Utc::now(),
        }
    }

    async fn check_store(&self) -> ComponentHealth {
        let start = Instant::now();

        let (status, message) =
            match tokio::time::timeout(self.config.check_timeout, self.service.ping()).await {
                Ok(Ok(())) => (HealthStatus::Healthy, "Connected".to_string()),
                Ok(Err(e)) => {
                    warn!(error = %e, "Store health check failed");
                    (HealthStatus::Unhealthy, e.to_string())
                }
                Err(_) => {
                    warn!("Store health check timed out");
                    (HealthStatus::Unhealthy, "Timed out".to_string())
                }
            };

        let details = self.database.as_ref().map(|db| {
            let stats = db.stats();
            serde_json::json!({
                "type": "postgresql",
                "pool_size": stats.size,
                "idle_connections": stats.idle,
            })
        });

        ComponentHealth {
            name: "store".to_string(),
            status,
            message: Some(message),
            response_time_ms: start.elapsed().as_millis() as u64,
            details,
        }
    }
}

/// Simple liveness check
pub async fn liveness() -> &'static str {
    "OK"
}

/// Readiness check
pub async fn readiness(
    State(checker): State<Arc<HealthChecker>>,
) -> (StatusCode, Json<HealthReport>) {
    let report = checker.check().await;
    let status = report.http_status();
    (status, Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ci_attachments::{CustomerStore, MemoryCustomerStore, StoreError, StoreResult};
    use ci_core::traits::Id;
    use ci_models::{Customer, Image, ImageMutation, NewImage};

    /// Store whose backend is unreachable
    struct DownStore;

    #[async_trait]
    impl CustomerStore for DownStore {
        async fn insert_customer(&self, _: &str, _: Vec<NewImage>) -> StoreResult<Customer> {
            Err(StoreError::Backend("down".into()))
        }
        async fn list_customers(&self) -> StoreResult<Vec<Customer>> {
            Err(StoreError::Backend("down".into()))
        }
        async fn find_customer(&self, _: Id) -> StoreResult<Option<Customer>> {
            Err(StoreError::Backend("down".into()))
        }
        async fn find_image(&self, _: Id, _: Id) -> StoreResult<Option<Image>> {
            Err(StoreError::Backend("down".into()))
        }
        async fn mutate_images(&self, _: Id, _: ImageMutation) -> StoreResult<Customer> {
            Err(StoreError::Backend("down".into()))
        }
        async fn count_images(&self, _: Id) -> StoreResult<Option<usize>> {
            Err(StoreError::Backend("down".into()))
        }
        async fn delete_customer(&self, _: Id) -> StoreResult<bool> {
            Err(StoreError::Backend("down".into()))
        }
        async fn ping(&self) -> StoreResult<()> {
            Err(StoreError::Backend("connection refused".into()))
        }
    }

    fn checker(store: Arc<dyn CustomerStore>, config: HealthConfig) -> HealthChecker {
        HealthChecker::new(config, CustomerImageService::new(store))
    }

    #[tokio::test]
    async fn test_health_check() {
        let checker = checker(Arc::new(MemoryCustomerStore::new()), HealthConfig::default());
        let report = checker.check().await;

        assert!(report.status.is_healthy());
        assert_eq!(report.components.len(), 1);
        assert_eq!(report.http_status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unreachable_store_is_unhealthy() {
        let checker = checker(Arc::new(DownStore), HealthConfig::default());
        let report = checker.check().await;

        assert_eq!(report.status, HealthStatus::Unhealthy);
        assert_eq!(report.http_status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(report.components[0]
            .message
            .as_deref()
            .is_some_and(|m| m.contains("connection refused")));
    }

    #[tokio::test]
    async fn test_health_cache() {
        let checker = checker(
            Arc::new(MemoryCustomerStore::new()),
            HealthConfig {
                cache_duration: Duration::from_secs(60),
                ..Default::default()
            },
        );

        let report1 = checker.check().await;
        let report2 = checker.check().await;

        assert_eq!(report1.timestamp, report2.timestamp);
    }
}
