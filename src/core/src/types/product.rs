//! Product records and their editable payload

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use super::organization::OrganizationId;

/// Maximum length of a product name
pub const NAME_MAX_LENGTH: u64 = 255;

/// Product identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Catalog product, owned by exactly one organization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,

    /// Owning organization, fixed at creation
    pub organization_id: OrganizationId,

    pub name: String,
    pub description: String,

    /// Reference to the stored image (path or URL)
    pub image: String,

    /// Price in IDR
    pub price: f64,

    pub available_date: NaiveDate,
    pub stock: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a product from a draft
    pub fn from_draft(id: ProductId, organization_id: OrganizationId, draft: ProductDraft) -> Self {
        let now = Utc::now();
        Self {
            id,
            organization_id,
            name: draft.name,
            description: draft.description,
            image: draft.image,
            price: draft.price,
            available_date: draft.available_date,
            stock: draft.stock,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an edit; the owning organization is left untouched
    pub fn apply(&mut self, draft: ProductDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.image = draft.image;
        self.price = draft.price;
        self.available_date = draft.available_date;
        self.stock = draft.stock;
        self.updated_at = Utc::now();
    }
}

/// Editable product attributes, as submitted by the create and edit forms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProductDraft {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(min = 1))]
    pub description: String,

    #[validate(length(min = 1))]
    pub image: String,

    #[validate(range(min = 0.0))]
    pub price: f64,

    pub available_date: NaiveDate,

    #[serde(default)]
    #[validate(range(min = 0))]
    pub stock: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Batik Shirt".to_string(),
            description: "Hand-stamped cotton".to_string(),
            image: "products/batik.png".to_string(),
            price: 250_000.0,
            available_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            stock: 12,
        }
    }

    #[test]
    fn test_valid_draft() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_name_length_limit() {
        let mut d = draft();
        d.name = "x".repeat(NAME_MAX_LENGTH as usize);
        assert!(d.validate().is_ok());

        d.name.push('x');
        let errors = d.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_required_fields() {
        let mut d = draft();
        d.description.clear();
        d.image.clear();
        let errors = d.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("description"));
        assert!(errors.field_errors().contains_key("image"));
    }

    #[test]
    fn test_negative_amounts_rejected() {
        let mut d = draft();
        d.price = -1.0;
        d.stock = -3;
        let errors = d.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
        assert!(errors.field_errors().contains_key("stock"));
    }

    #[test]
    fn test_stock_defaults_to_zero() {
        let d: ProductDraft = serde_json::from_value(serde_json::json!({
            "name": "Kopi",
            "description": "Arabica beans",
            "image": "products/kopi.png",
            "price": 85000,
            "available_date": "2024-06-01"
        }))
        .unwrap();
        assert_eq!(d.stock, 0);
    }

    #[test]
    fn test_apply_keeps_organization() {
        let mut product = Product::from_draft(ProductId(1), OrganizationId(4), draft());
        let mut edit = draft();
        edit.name = "Batik Dress".to_string();
        product.apply(edit);

        assert_eq!(product.name, "Batik Dress");
        assert_eq!(product.organization_id, OrganizationId(4));
    }
}
