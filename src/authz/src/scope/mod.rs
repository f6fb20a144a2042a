//! Tenant access scope for products
//!
//! Record-level predicates (view, edit, delete), list scoping and the
//! organization a new product is created in.
//!
//! # Examples
//!
//! ```
//! use catalog_authz::scope::AccessScope;
//! use catalog_core::{Principal, Role};
//!
//! let scope = AccessScope::new();
//! let root = Principal::new("user:root", 1).with_role(Role::SuperAdmin);
//!
//! assert!(scope.resolve_organization_field(&root).editable);
//! ```

mod types;
mod access;


pub use types::ListScoping;
pub use access::AccessScope;
