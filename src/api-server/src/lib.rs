// API Server for the multi-tenant product catalog
// REST layer over the access scope, with OpenAPI documentation

pub mod error;
pub mod extract;
pub mod handlers;
pub mod identity;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, Result};
pub use extract::{ApiJson, ApiPath, ApiQuery};
pub use identity::CurrentPrincipal;
pub use server::{Server, ServerBuilder, ServerConfig};
pub use state::AppState;

/// API version
pub const API_VERSION: &str = "v1";

/// Health check response
#[derive(Debug, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
