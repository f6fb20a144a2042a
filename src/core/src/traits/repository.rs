//! Persistence traits

use crate::error::Result;
use crate::types::{Organization, OrganizationId, Product, ProductDraft, ProductId, ProductQuery};
use async_trait::async_trait;

/// Product storage backend
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Query every row the backend holds, before any access scoping
    fn base_query(&self) -> ProductQuery {
        ProductQuery::new()
    }

    /// Run a query
    async fn find(&self, query: &ProductQuery) -> Result<Vec<Product>>;

    /// Get a product by ID
    async fn get(&self, id: ProductId) -> Result<Option<Product>>;

    /// Store a new product owned by `organization_id`
    async fn insert(&self, organization_id: OrganizationId, draft: ProductDraft) -> Result<Product>;

    /// Replace the editable attributes of a product
    async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product>;

    /// Delete a product, returning whether it existed
    async fn delete(&self, id: ProductId) -> Result<bool>;
}

/// Read access to the tenant list
#[async_trait]
pub trait OrganizationDirectory: Send + Sync {
    /// List all organizations, ordered by name
    async fn list(&self) -> Result<Vec<Organization>>;

    /// Get an organization by ID
    async fn get(&self, id: OrganizationId) -> Result<Option<Organization>>;
}
