//! Product table schema

use catalog_core::{Principal, Product};
use serde::{Deserialize, Serialize};

use crate::scope::AccessScope;

/// Cell rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnKind {
    Image,
    Text,
    Money { currency: String },
    Date,
}

/// Table column definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Attribute path, `relation.attribute` for related records
    pub name: String,
    #[serde(flatten)]
    pub kind: ColumnKind,
    pub sortable: bool,
    pub searchable: bool,
    pub visible: bool,
}

impl ColumnSpec {
    fn new(name: &str, kind: ColumnKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            sortable: false,
            searchable: false,
            visible: true,
        }
    }

    fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// Per-row action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowAction {
    View,
    Edit,
    Delete,
}

impl RowAction {
    pub const ALL: [RowAction; 3] = [RowAction::View, RowAction::Edit, RowAction::Delete];
}

/// Ordered product table columns; the organization column is shown to super admins only
pub fn build_column_list(principal: &Principal) -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("image", ColumnKind::Image),
        ColumnSpec::new("organization.name", ColumnKind::Text)
            .sortable()
            .visible(principal.is_super_admin()),
        ColumnSpec::new("name", ColumnKind::Text).sortable().searchable(),
        ColumnSpec::new(
            "price",
            ColumnKind::Money {
                currency: "IDR".to_string(),
            },
        ),
        ColumnSpec::new("available_date", ColumnKind::Date),
        ColumnSpec::new("stock", ColumnKind::Text).sortable(),
    ]
}

/// Row actions the principal may trigger on this product
pub fn row_actions(scope: &AccessScope, principal: &Principal, product: &Product) -> Vec<RowAction> {
    RowAction::ALL
        .into_iter()
        .filter(|action| match action {
            RowAction::View => scope.can_view(principal, product),
            RowAction::Edit => scope.can_edit(principal, product),
            RowAction::Delete => scope.can_delete(principal, product),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::{OrganizationId, ProductDraft, ProductId, Role};
    use chrono::NaiveDate;

    fn product(org: i64) -> Product {
        Product::from_draft(
            ProductId(1),
            OrganizationId(org),
            ProductDraft {
                name: "Kopi".to_string(),
                description: "Arabica".to_string(),
                image: "products/kopi.png".to_string(),
                price: 85_000.0,
                available_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                stock: 3,
            },
        )
    }

    #[test]
    fn test_organization_column_visibility() {
        let root = Principal::new("user:root", 1).with_role(Role::SuperAdmin);
        let admin = Principal::new("user:budi", 1).with_role(Role::OrganizationAdmin);

        assert!(build_column_list(&root)[1].visible);
        assert!(!build_column_list(&admin)[1].visible);
        assert_eq!(build_column_list(&admin)[1].name, "organization.name");
    }

    #[test]
    fn test_sortable_and_searchable_columns() {
        let columns = build_column_list(&Principal::new("user:budi", 1));
        let sortable: Vec<&str> = columns
            .iter()
            .filter(|c| c.sortable)
            .map(|c| c.name.as_str())
            .collect();
        let searchable: Vec<&str> = columns
            .iter()
            .filter(|c| c.searchable)
            .map(|c| c.name.as_str())
            .collect();

        assert_eq!(sortable, vec!["organization.name", "name", "stock"]);
        assert_eq!(searchable, vec!["name"]);
    }

    #[test]
    fn test_row_actions_follow_policy() {
        let scope = AccessScope::new();
        let admin = Principal::new("user:budi", 3).with_role(Role::OrganizationAdmin);

        assert_eq!(row_actions(&scope, &admin, &product(3)), RowAction::ALL.to_vec());
        assert!(row_actions(&scope, &admin, &product(4)).is_empty());
        assert!(row_actions(&scope, &Principal::new("user:guest", 3), &product(3)).is_empty());
    }

    #[test]
    fn test_money_column_serialization() {
        let columns = build_column_list(&Principal::new("user:budi", 1));
        let json = serde_json::to_value(&columns[3]).unwrap();
        assert_eq!(json["type"], "money");
        assert_eq!(json["currency"], "IDR");
    }
}
