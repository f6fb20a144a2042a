//! Collaborator traits for the catalog

pub mod repository;

pub use repository::{OrganizationDirectory, ProductRepository};
