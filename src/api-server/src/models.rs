use catalog_authz::{ColumnSpec, FieldSpec, ResourceDescriptor, RowAction};
use catalog_core::{
    Organization, OrganizationId, Product, ProductDraft, SortDirection, SortField,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Product as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: i64,
    pub organization_id: i64,

    /// Name of the owning organization, when it still exists
    pub organization_name: Option<String>,

    pub name: String,
    pub description: String,
    pub image: String,
    pub price: f64,
    pub available_date: NaiveDate,
    pub stock: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Row actions the caller may trigger
    #[schema(value_type = Vec<String>)]
    pub actions: Vec<RowAction>,
}

impl ProductResponse {
    pub fn new(product: Product, organization_name: Option<String>, actions: Vec<RowAction>) -> Self {
        Self {
            id: product.id.0,
            organization_id: product.organization_id.get(),
            organization_name,
            name: product.name,
            description: product.description,
            image: product.image,
            price: product.price,
            available_date: product.available_date,
            stock: product.stock,
            created_at: product.created_at,
            updated_at: product.updated_at,
            actions,
        }
    }
}

/// Query parameters of the product listing
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListProductsParams {
    /// Case-insensitive search over the product name
    pub search: Option<String>,

    /// Sort column (name, stock, organization_name)
    #[param(value_type = Option<String>)]
    pub sort: Option<SortField>,

    /// Sort direction (asc, desc)
    #[param(value_type = Option<String>)]
    pub direction: Option<SortDirection>,

    /// Maximum number of results
    #[validate(range(min = 1, max = 500))]
    #[serde(default = "default_limit")]
    pub limit: usize,

    #[validate(range(max = 2147483647))]
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    50
}

/// Product listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListProductsResponse {
    pub products: Vec<ProductResponse>,
    pub count: usize,
    pub limit: usize,
    pub offset: usize,
}

/// Editable product attributes
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductPayload {
    pub name: String,
    pub description: String,

    /// Stored image reference
    pub image: String,

    /// Price in IDR
    pub price: f64,

    pub available_date: NaiveDate,

    #[serde(default)]
    pub stock: i64,
}

impl From<ProductPayload> for ProductDraft {
    fn from(payload: ProductPayload) -> Self {
        ProductDraft {
            name: payload.name,
            description: payload.description,
            image: payload.image,
            price: payload.price,
            available_date: payload.available_date,
            stock: payload.stock,
        }
    }
}

/// Product creation request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    /// Owning organization; required for super admins, otherwise implied
    pub organization_id: Option<i64>,

    #[serde(flatten)]
    pub product: ProductPayload,
}

impl CreateProductRequest {
    pub fn into_parts(self) -> (Option<OrganizationId>, ProductDraft) {
        (
            self.organization_id.map(OrganizationId),
            self.product.into(),
        )
    }
}

/// Organization entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrganizationResponse {
    pub id: i64,
    pub name: String,
}

impl From<Organization> for OrganizationResponse {
    fn from(organization: Organization) -> Self {
        Self {
            id: organization.id.get(),
            name: organization.name,
        }
    }
}

/// Product form for the caller, in display order
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FormSchemaResponse {
    #[schema(value_type = Vec<Object>)]
    pub fields: Vec<FieldSpec>,
}

/// Product table for the caller
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TableSchemaResponse {
    #[schema(value_type = Vec<Object>)]
    pub columns: Vec<ColumnSpec>,

    /// Row actions the table offers; each row lists the ones the caller may use
    #[schema(value_type = Vec<String>)]
    pub actions: Vec<RowAction>,
}

/// Registered page of the resource
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PageResponse {
    pub page: String,
    pub route: String,
}

/// Navigation entry and pages of the product resource
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PagesResponse {
    pub slug: String,
    pub navigation_icon: String,
    pub pages: Vec<PageResponse>,
}

impl From<ResourceDescriptor> for PagesResponse {
    fn from(resource: ResourceDescriptor) -> Self {
        Self {
            slug: resource.slug,
            navigation_icon: resource.navigation_icon,
            pages: resource
                .pages
                .into_iter()
                .map(|entry| PageResponse {
                    page: entry.page.name().to_string(),
                    route: entry.route,
                })
                .collect(),
        }
    }
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub status: u16,
}
