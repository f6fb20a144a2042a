//! Tenant (organization) types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Organization (tenant) identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrganizationId(pub i64);

impl OrganizationId {
    /// Raw integer value
    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for OrganizationId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for OrganizationId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

impl fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tenant owning products
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Organization identifier
    pub id: OrganizationId,

    /// Display name, shown in the organization selector and table column
    pub name: String,
}

impl Organization {
    /// Create a new organization
    pub fn new(id: impl Into<OrganizationId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
