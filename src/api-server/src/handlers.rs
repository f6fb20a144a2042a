use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use catalog_authz::{
    build_column_list, build_field_list, product_resource, row_actions, Action, AuthzError,
    RowAction,
};
use catalog_core::{OrganizationId, Principal, Product, ProductDraft, ProductId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::{
    error::{ApiError, Result},
    extract::{ApiJson, ApiPath, ApiQuery},
    identity::CurrentPrincipal,
    models::*,
    state::AppState,
    HealthResponse,
};

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime_seconds: state.uptime_seconds(),
    })
}

/// Prometheus metrics endpoint
#[utoipa::path(
    get,
    path = "/metrics",
    responses(
        (status = 200, description = "Prometheus text exposition", body = String)
    ),
    tag = "health"
)]
pub async fn metrics(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse> {
    let body = state
        .metrics
        .render()
        .map_err(|e| ApiError::InternalError(format!("metrics encoding: {}", e)))?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    ))
}

/// List the products visible to the caller
#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(ListProductsParams),
    responses(
        (status = 200, description = "Products in the caller's scope", body = ListProductsResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 401, description = "Missing identity", body = ErrorResponse)
    ),
    tag = "products"
)]
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    ApiQuery(params): ApiQuery<ListProductsParams>,
) -> Result<Json<ListProductsResponse>> {
    params
        .validate()
        .map_err(|e| ApiError::ValidationError(e.to_string()))?;

    let mut base = state.products.base_query();
    if let Some(term) = params.search.as_deref() {
        base = base.search(term);
    }
    if let Some(field) = params.sort {
        base = base.sort_by(field, params.direction.unwrap_or_default());
    }
    let base = base.paginate(Some(params.limit), params.offset);

    let query = state.access.scope_list(&principal, base);
    let products = state.products.find(&query).await?;
    let names = organization_names(&state).await?;

    let products: Vec<ProductResponse> = products
        .into_iter()
        .map(|product| respond(&state, &principal, &names, product))
        .collect();

    Ok(Json(ListProductsResponse {
        count: products.len(),
        products,
        limit: params.limit,
        offset: params.offset,
    }))
}

/// Create a product
#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid payload or missing organization", body = ErrorResponse),
        (status = 401, description = "Missing identity", body = ErrorResponse),
        (status = 403, description = "Operation not permitted", body = ErrorResponse)
    ),
    tag = "products"
)]
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    ApiJson(req): ApiJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    let (requested, draft) = req.into_parts();
    validate_draft(&draft)?;

    let organization_id = match state.access.resolve_create_organization(&principal, requested) {
        Ok(organization_id) => {
            state.metrics.record_decision(Action::Create, true);
            organization_id
        }
        Err(e) => {
            if matches!(e, AuthzError::Denied { .. }) {
                state.metrics.record_decision(Action::Create, false);
            }
            return Err(e.into());
        }
    };

    let organization = state
        .organizations
        .get(organization_id)
        .await?
        .ok_or_else(|| {
            ApiError::ValidationError(format!("unknown organization {}", organization_id))
        })?;

    let product = state.products.insert(organization.id, draft).await?;
    info!(
        principal = %principal.id,
        product = %product.id,
        organization = %organization.id,
        "Product created"
    );

    let actions = row_actions(&state.access, &principal, &product);
    Ok((
        StatusCode::CREATED,
        Json(ProductResponse::new(product, Some(organization.name), actions)),
    ))
}

/// View a product
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product details", body = ProductResponse),
        (status = 401, description = "Missing identity", body = ErrorResponse),
        (status = 403, description = "Operation not permitted", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    tag = "products"
)]
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ProductResponse>> {
    let product = fetch(&state, ProductId(id)).await?;
    enforce(&state, &principal, Action::View, &product)?;

    let names = organization_names(&state).await?;
    Ok(Json(respond(&state, &principal, &names, product)))
}

/// Edit a product; the owning organization never changes
#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 401, description = "Missing identity", body = ErrorResponse),
        (status = 403, description = "Operation not permitted", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    tag = "products"
)]
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<ProductPayload>,
) -> Result<Json<ProductResponse>> {
    let draft = ProductDraft::from(payload);
    validate_draft(&draft)?;

    let product = fetch(&state, ProductId(id)).await?;
    enforce(&state, &principal, Action::Edit, &product)?;

    let product = state.products.update(product.id, draft).await?;
    info!(principal = %principal.id, product = %product.id, "Product updated");

    let names = organization_names(&state).await?;
    Ok(Json(respond(&state, &principal, &names, product)))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 401, description = "Missing identity", body = ErrorResponse),
        (status = 403, description = "Operation not permitted", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    tag = "products"
)]
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode> {
    let product = fetch(&state, ProductId(id)).await?;
    enforce(&state, &principal, Action::Delete, &product)?;

    if !state.products.delete(product.id).await? {
        return Err(ApiError::NotFound(format!("Product {} not found", id)));
    }
    info!(principal = %principal.id, product = %product.id, "Product deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Product form for the caller
#[utoipa::path(
    get,
    path = "/api/v1/products/form",
    responses(
        (status = 200, description = "Form fields in display order", body = FormSchemaResponse),
        (status = 401, description = "Missing identity", body = ErrorResponse)
    ),
    tag = "schema"
)]
pub async fn product_form(
    State(state): State<Arc<AppState>>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> Result<Json<FormSchemaResponse>> {
    let mut fields = build_field_list(&principal);

    // Only the super admin selector carries options
    if principal.is_super_admin() {
        let organizations = state.organizations.list().await?;
        fields = fields
            .into_iter()
            .map(|field| {
                if field.name == "organization_id" {
                    field.with_options(&organizations)
                } else {
                    field
                }
            })
            .collect();
    }

    Ok(Json(FormSchemaResponse { fields }))
}

/// Product table for the caller
#[utoipa::path(
    get,
    path = "/api/v1/products/table",
    responses(
        (status = 200, description = "Table columns and row actions", body = TableSchemaResponse),
        (status = 401, description = "Missing identity", body = ErrorResponse)
    ),
    tag = "schema"
)]
pub async fn product_table(
    CurrentPrincipal(principal): CurrentPrincipal,
) -> Json<TableSchemaResponse> {
    Json(TableSchemaResponse {
        columns: build_column_list(&principal),
        actions: RowAction::ALL.to_vec(),
    })
}

/// Page registry of the product resource
#[utoipa::path(
    get,
    path = "/api/v1/products/pages",
    responses(
        (status = 200, description = "Navigation entry and pages", body = PagesResponse)
    ),
    tag = "schema"
)]
pub async fn product_pages() -> Json<PagesResponse> {
    Json(product_resource().into())
}

/// Organizations the caller may pick from
#[utoipa::path(
    get,
    path = "/api/v1/organizations",
    responses(
        (status = 200, description = "Organizations ordered by name", body = Vec<OrganizationResponse>),
        (status = 401, description = "Missing identity", body = ErrorResponse)
    ),
    tag = "organizations"
)]
pub async fn list_organizations(
    State(state): State<Arc<AppState>>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> Result<Json<Vec<OrganizationResponse>>> {
    let organizations = if principal.is_super_admin() {
        state.organizations.list().await?
    } else {
        state
            .organizations
            .get(principal.organization_id)
            .await?
            .into_iter()
            .collect()
    };

    Ok(Json(
        organizations
            .into_iter()
            .map(OrganizationResponse::from)
            .collect(),
    ))
}

fn validate_draft(draft: &ProductDraft) -> Result<()> {
    draft
        .validate()
        .map_err(|e| ApiError::ValidationError(e.to_string()))
}

async fn fetch(state: &AppState, id: ProductId) -> Result<Product> {
    state
        .products
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Product {} not found", id)))
}

/// Authorize a record-level action and count the decision
fn enforce(state: &AppState, principal: &Principal, action: Action, product: &Product) -> Result<()> {
    let result = state.access.authorize(principal, action, product);
    state.metrics.record_decision(action, result.is_ok());
    result?;
    Ok(())
}

async fn organization_names(state: &AppState) -> Result<HashMap<OrganizationId, String>> {
    Ok(state
        .organizations
        .list()
        .await?
        .into_iter()
        .map(|organization| (organization.id, organization.name))
        .collect())
}

fn respond(
    state: &AppState,
    principal: &Principal,
    names: &HashMap<OrganizationId, String>,
    product: Product,
) -> ProductResponse {
    let actions = row_actions(&state.access, principal, &product);
    let organization_name = names.get(&product.organization_id).cloned();
    ProductResponse::new(product, organization_name, actions)
}
