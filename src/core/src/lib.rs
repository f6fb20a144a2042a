//! # Catalog Core
//!
//! Shared types, collaborator traits and error handling for the multi-tenant
//! product catalog. The access policy lives in `catalog-authz`; this crate only
//! knows about principals, organizations, products and how to query them.

pub mod types;
pub mod traits;
pub mod store;
pub mod error;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use types::{
    Condition, Organization, OrganizationId, Principal, Product, ProductDraft, ProductId,
    ProductQuery, Role, RoleSet, SortDirection, SortField, UserId,
};
pub use traits::{OrganizationDirectory, ProductRepository};
pub use store::{CatalogSeed, InMemoryCatalog};

#[cfg(feature = "postgres")]
pub use store::PostgresCatalog;
