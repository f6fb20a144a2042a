//! Route definitions for the API server
//!
//! This module configures all HTTP routes with OpenAPI documentation.
//! Routes are organized by functionality:
//! - Health and metrics endpoints
//! - Product management
//! - Form, table and page schemas
//! - Organization lookup

use crate::{handlers, middleware, state::AppState};
use axum::{
    middleware as axum_middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation configuration
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product Catalog API",
        version = "0.1.0",
        description = "Multi-tenant product catalog with organization-scoped access"
    ),
    paths(
        handlers::health_check,
        handlers::metrics,
        handlers::list_products,
        handlers::create_product,
        handlers::get_product,
        handlers::update_product,
        handlers::delete_product,
        handlers::product_form,
        handlers::product_table,
        handlers::product_pages,
        handlers::list_organizations,
    ),
    components(
        schemas(
            crate::HealthResponse,
            crate::models::ProductResponse,
            crate::models::ListProductsResponse,
            crate::models::ProductPayload,
            crate::models::CreateProductRequest,
            crate::models::OrganizationResponse,
            crate::models::FormSchemaResponse,
            crate::models::TableSchemaResponse,
            crate::models::PageResponse,
            crate::models::PagesResponse,
            crate::models::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health and monitoring endpoints"),
        (name = "products", description = "Product management endpoints"),
        (name = "schema", description = "Form, table and page definitions"),
        (name = "organizations", description = "Organization lookup"),
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    )
)]
pub struct ApiDoc;

/// Create the application router with all routes and middleware
pub fn create_router(state: Arc<AppState>) -> Router {
    // Identity comes from gateway headers, see `identity`
    let api_routes = Router::new()
        .route(
            "/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route("/products/form", get(handlers::product_form))
        .route("/products/table", get(handlers::product_table))
        .route("/products/pages", get(handlers::product_pages))
        .route(
            "/products/:id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route("/organizations", get(handlers::list_organizations));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics))
        .nest("/api/v1", api_routes)
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state.clone())
        // Executed bottom to top
        .layer(axum_middleware::from_fn_with_state(
            state,
            middleware::metrics_middleware,
        ))
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(axum_middleware::from_fn(middleware::request_id_middleware))
        .layer(middleware::cors_layer())
        .layer(TraceLayer::new_for_http())
}
