//! Composable product queries
//!
//! A [`ProductQuery`] is a value: every builder method consumes the query and
//! returns a narrowed copy, so a base query handed out by a repository can be
//! scoped by the access policy without side effects. Conditions are ANDed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::organization::OrganizationId;
use super::product::Product;

/// Row condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// `organization_id = ?`
    OrganizationEq { organization_id: OrganizationId },
    /// `organization_id IN (?, ...)`
    OrganizationIn { organization_ids: BTreeSet<OrganizationId> },
}

impl Condition {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Condition::OrganizationEq { organization_id } => {
                product.organization_id == *organization_id
            }
            Condition::OrganizationIn { organization_ids } => {
                organization_ids.contains(&product.organization_id)
            }
        }
    }
}

/// Sortable columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    Stock,
    OrganizationName,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Query over products
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductQuery {
    conditions: Vec<Condition>,
    search: Option<String>,
    sort: Option<(SortField, SortDirection)>,
    limit: Option<usize>,
    offset: usize,
}

impl ProductQuery {
    /// Unrestricted query
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition
    pub fn filter(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Restrict to a single organization
    pub fn where_organization(self, organization_id: OrganizationId) -> Self {
        self.filter(Condition::OrganizationEq { organization_id })
    }

    /// Restrict to a set of organizations
    pub fn where_organization_in<I>(self, organization_ids: I) -> Self
    where
        I: IntoIterator<Item = OrganizationId>,
    {
        self.filter(Condition::OrganizationIn {
            organization_ids: organization_ids.into_iter().collect(),
        })
    }

    /// Case-insensitive search on the product name; blank terms are ignored
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        let term = term.trim();
        self.search = if term.is_empty() {
            None
        } else {
            Some(term.to_string())
        };
        self
    }

    pub fn sort_by(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort = Some((field, direction));
        self
    }

    pub fn paginate(mut self, limit: Option<usize>, offset: usize) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn sort(&self) -> Option<(SortField, SortDirection)> {
        self.sort
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whether the query restricts results to exactly this organization
    pub fn is_scoped_to(&self, organization_id: OrganizationId) -> bool {
        self.conditions.iter().any(|c| {
            matches!(c, Condition::OrganizationEq { organization_id: id } if *id == organization_id)
        })
    }

    /// Row predicate: all conditions and the search term
    pub fn matches(&self, product: &Product) -> bool {
        if !self.conditions.iter().all(|c| c.matches(product)) {
            return false;
        }

        match &self.search {
            Some(term) => product
                .name
                .to_lowercase()
                .contains(&term.to_lowercase()),
            None => true,
        }
    }
}
