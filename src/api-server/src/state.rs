use catalog_authz::AccessScope;
use catalog_core::{InMemoryCatalog, OrganizationDirectory, ProductRepository};
use std::sync::Arc;
use std::time::Instant;

use crate::error::{ApiError, Result};
use crate::metrics::ApiMetrics;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Product storage
    pub products: Arc<dyn ProductRepository>,

    /// Tenant list
    pub organizations: Arc<dyn OrganizationDirectory>,

    /// Access policy
    pub access: AccessScope,

    pub metrics: Arc<ApiMetrics>,

    /// Server start time for uptime calculation
    pub start_time: Instant,

    /// Application version
    pub version: String,
}

impl AppState {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        organizations: Arc<dyn OrganizationDirectory>,
        access: AccessScope,
    ) -> Result<Self> {
        let metrics = ApiMetrics::new()
            .map_err(|e| ApiError::InternalError(format!("metrics registry: {}", e)))?;

        Ok(Self {
            products,
            organizations,
            access,
            metrics: Arc::new(metrics),
            start_time: Instant::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }

    /// State over a single in-memory catalog
    pub fn in_memory(catalog: Arc<InMemoryCatalog>, access: AccessScope) -> Result<Self> {
        Self::new(catalog.clone(), catalog, access)
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
