//! # Catalog Authorization
//!
//! Multi-tenant access policy for catalog products, and the role-dependent
//! admin configuration (form fields, table columns, pages) derived from it.
//!
//! ## Policy
//!
//! - `super_admin` may view, edit and delete every product.
//! - `organization_admin` may do so only for products of their own organization.
//! - Everyone else is denied.
//! - Product lists are narrowed to the principal's organization when the
//!   principal holds `organization_admin`.
//!
//! ## Example
//!
//! ```rust
//! use catalog_authz::AccessScope;
//! use catalog_core::{OrganizationId, Principal, ProductQuery, Role};
//!
//! let scope = AccessScope::new();
//! let admin = Principal::new("user:siti", 7).with_role(Role::OrganizationAdmin);
//!
//! let query = scope.scope_list(&admin, ProductQuery::new());
//! assert!(query.is_scoped_to(OrganizationId(7)));
//! ```

pub mod types;
pub mod error;
pub mod scope;
pub mod form;
pub mod table;
pub mod pages;

// Re-export commonly used types
pub use types::{Action, Decision, DecisionReason};
pub use error::{AuthzError, Result};
pub use scope::{AccessScope, ListScoping};
pub use form::{build_field_list, resolve_organization_field, FieldKind, FieldSpec, SelectOption};
pub use table::{build_column_list, row_actions, ColumnKind, ColumnSpec, RowAction};
pub use pages::{product_resource, Page, ResourceDescriptor};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
