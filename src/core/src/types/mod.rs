//! Core catalog types

pub mod organization;
pub mod principal;
pub mod product;
pub mod query;

pub use organization::{Organization, OrganizationId};
pub use principal::{Principal, Role, RoleSet, UserId};
pub use product::{Product, ProductDraft, ProductId};
pub use query::{Condition, ProductQuery, SortDirection, SortField};
