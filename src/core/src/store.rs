//! Catalog storage implementations

use crate::error::{CoreError, Result};
use crate::traits::{OrganizationDirectory, ProductRepository};
use crate::types::{
    Organization, OrganizationId, Product, ProductDraft, ProductId, ProductQuery, SortDirection,
    SortField,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::PostgresCatalog;

/// Product entry of a seed file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedProduct {
    pub organization_id: OrganizationId,

    #[serde(flatten)]
    pub draft: ProductDraft,
}

/// Initial catalog contents
///
/// ```json
/// {
///   "organizations": [{ "id": 1, "name": "Acme" }],
///   "products": [{
///     "organization_id": 1, "name": "Kopi", "description": "Arabica",
///     "image": "products/kopi.png", "price": 85000,
///     "available_date": "2024-06-01", "stock": 10
///   }]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub organizations: Vec<Organization>,

    #[serde(default)]
    pub products: Vec<SeedProduct>,
}

impl CatalogSeed {
    /// Read a seed file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await?;
        let seed: CatalogSeed = serde_json::from_str(&raw)?;
        debug!(
            path = %path.display(),
            organizations = seed.organizations.len(),
            products = seed.products.len(),
            "Loaded catalog seed"
        );
        Ok(seed)
    }

    /// Organization ids are unique and every product names a seeded organization
    pub fn check(&self) -> Result<()> {
        let mut ids = BTreeSet::new();
        for organization in &self.organizations {
            if !ids.insert(organization.id) {
                return Err(CoreError::configuration(format!(
                    "duplicate organization {} in seed",
                    organization.id
                )));
            }
        }

        if let Some(orphan) = self
            .products
            .iter()
            .find(|p| !ids.contains(&p.organization_id))
        {
            return Err(CoreError::configuration(format!(
                "seed product '{}' names unknown organization {}",
                orphan.draft.name, orphan.organization_id
            )));
        }
        Ok(())
    }
}

/// In-memory catalog holding organizations and products
pub struct InMemoryCatalog {
    organizations: Arc<RwLock<BTreeMap<OrganizationId, Organization>>>,
    products: Arc<RwLock<BTreeMap<ProductId, Product>>>,
    next_id: AtomicI64,
}

impl InMemoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            organizations: Arc::new(RwLock::new(BTreeMap::new())),
            products: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: AtomicI64::new(1),
        }
    }

    /// Create a catalog populated from a seed
    pub async fn from_seed(seed: CatalogSeed) -> Result<Self> {
        seed.check()?;

        let catalog = Self::new();
        for organization in seed.organizations {
            catalog.add_organization(organization).await;
        }
        for entry in seed.products {
            catalog.insert(entry.organization_id, entry.draft).await?;
        }

        info!(
            organizations = catalog.organizations.read().await.len(),
            products = catalog.products.read().await.len(),
            "In-memory catalog seeded"
        );
        Ok(catalog)
    }

    /// Register or rename an organization
    pub async fn add_organization(&self, organization: Organization) {
        let mut organizations = self.organizations.write().await;
        organizations.insert(organization.id, organization);
    }

    fn sort(
        products: &mut [Product],
        field: SortField,
        direction: SortDirection,
        organizations: &BTreeMap<OrganizationId, Organization>,
    ) {
        let org_name = |id: &OrganizationId| {
            organizations
                .get(id)
                .map(|o| o.name.as_str())
                .unwrap_or_default()
        };

        products.sort_by(|a, b| {
            let ordering = match field {
                SortField::Name => a.name.cmp(&b.name),
                SortField::Stock => a.stock.cmp(&b.stock),
                SortField::OrganizationName => {
                    org_name(&a.organization_id).cmp(&org_name(&b.organization_id))
                }
            }
            .then_with(|| a.id.cmp(&b.id));

            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryCatalog {
    async fn find(&self, query: &ProductQuery) -> Result<Vec<Product>> {
        let organizations = self.organizations.read().await;
        let products = self.products.read().await;

        let mut rows: Vec<Product> = products
            .values()
            .filter(|p| query.matches(p))
            .cloned()
            .collect();

        if let Some((field, direction)) = query.sort() {
            Self::sort(&mut rows, field, direction, &organizations);
        }

        Ok(rows
            .into_iter()
            .skip(query.offset())
            .take(query.limit().unwrap_or(usize::MAX))
            .collect())
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn insert(&self, organization_id: OrganizationId, draft: ProductDraft) -> Result<Product> {
        if !self.organizations.read().await.contains_key(&organization_id) {
            return Err(CoreError::not_found(format!(
                "organization {}",
                organization_id
            )));
        }

        let id = ProductId(self.next_id.fetch_add(1, AtomicOrdering::SeqCst));
        let product = Product::from_draft(id, organization_id, draft);

        let mut products = self.products.write().await;
        products.insert(id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product> {
        let mut products = self.products.write().await;
        let product = products
            .get_mut(&id)
            .ok_or_else(|| CoreError::not_found(format!("product {}", id)))?;

        product.apply(draft);
        Ok(product.clone())
    }

    async fn delete(&self, id: ProductId) -> Result<bool> {
        let mut products = self.products.write().await;
        Ok(products.remove(&id).is_some())
    }
}

#[async_trait]
impl OrganizationDirectory for InMemoryCatalog {
    async fn list(&self) -> Result<Vec<Organization>> {
        let organizations = self.organizations.read().await;
        let mut list: Vec<Organization> = organizations.values().cloned().collect();
        list.sort_by(|a, b| match a.name.cmp(&b.name) {
            Ordering::Equal => a.id.cmp(&b.id),
            other => other,
        });
        Ok(list)
    }

    async fn get(&self, id: OrganizationId) -> Result<Option<Organization>> {
        let organizations = self.organizations.read().await;
        Ok(organizations.get(&id).cloned())
    }
}
