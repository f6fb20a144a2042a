//! Authenticated principal and role types

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::organization::OrganizationId;

/// User identifier supplied by the identity layer
pub type UserId = String;

/// Role label granting elevated capability
///
/// Only `super_admin` and `organization_admin` carry meaning for the catalog
/// policy. Any other label is preserved as [`Role::Other`] so that a
/// principal round-trips unchanged, but it never grants access.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Cross-tenant administrator
    SuperAdmin,
    /// Administrator of a single organization
    OrganizationAdmin,
    /// Any other label
    Other(String),
}

impl Role {
    pub const SUPER_ADMIN: &'static str = "super_admin";
    pub const ORGANIZATION_ADMIN: &'static str = "organization_admin";

    /// Role label as stored by the identity layer
    pub fn as_str(&self) -> &str {
        match self {
            Role::SuperAdmin => Self::SUPER_ADMIN,
            Role::OrganizationAdmin => Self::ORGANIZATION_ADMIN,
            Role::Other(name) => name,
        }
    }
}

impl FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            Self::SUPER_ADMIN => Role::SuperAdmin,
            Self::ORGANIZATION_ADMIN => Role::OrganizationAdmin,
            other => Role::Other(other.to_string()),
        })
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(role) => role,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        Role::from(s.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of roles held by a principal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    /// Empty role set
    pub fn new() -> Self {
        Self::default()
    }

    /// Membership test
    pub fn contains(&self, role: &Role) -> bool {
        self.0.contains(role)
    }

    /// Add a role, returning whether it was newly inserted
    pub fn insert(&mut self, role: Role) -> bool {
        self.0.insert(role)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.0.iter()
    }

    /// Parse a comma-separated role list, skipping empty entries
    ///
    /// `"super_admin, organization_admin"` yields both roles.
    pub fn parse_list(s: &str) -> Self {
        s.split(',')
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(Role::from)
            .collect()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Principal (the authenticated actor making a request)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// User identifier
    pub id: UserId,

    /// Organization the principal belongs to
    pub organization_id: OrganizationId,

    /// Resolved roles
    #[serde(default)]
    pub roles: RoleSet,
}

impl Principal {
    /// Create a principal without roles
    pub fn new(id: impl Into<UserId>, organization_id: impl Into<OrganizationId>) -> Self {
        Self {
            id: id.into(),
            organization_id: organization_id.into(),
            roles: RoleSet::new(),
        }
    }

    /// Add a role to the principal
    pub fn with_role(mut self, role: impl Into<Role>) -> Self {
        self.roles.insert(role.into());
        self
    }

    /// Replace the principal's roles
    pub fn with_roles<I, R>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }

    pub fn is_super_admin(&self) -> bool {
        self.has_role(&Role::SuperAdmin)
    }

    pub fn is_organization_admin(&self) -> bool {
        self.has_role(&Role::OrganizationAdmin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!(Role::from("super_admin"), Role::SuperAdmin);
        assert_eq!(Role::from("organization_admin"), Role::OrganizationAdmin);
        assert_eq!(Role::from("editor"), Role::Other("editor".to_string()));
        assert_eq!(Role::OrganizationAdmin.to_string(), "organization_admin");
    }

    #[test]
    fn test_role_set_parse_list() {
        let roles = RoleSet::parse_list("super_admin, organization_admin,,editor ");
        assert_eq!(roles.len(), 3);
        assert!(roles.contains(&Role::SuperAdmin));
        assert!(roles.contains(&Role::OrganizationAdmin));
        assert!(roles.contains(&Role::Other("editor".to_string())));

        assert!(RoleSet::parse_list("").is_empty());
    }

    #[test]
    fn test_principal_creation() {
        let principal = Principal::new("user:alice", 3).with_role(Role::OrganizationAdmin);

        assert_eq!(principal.id, "user:alice");
        assert_eq!(principal.organization_id, OrganizationId(3));
        assert!(principal.is_organization_admin());
        assert!(!principal.is_super_admin());
    }

    #[test]
    fn test_principal_roles_serialize_as_labels() {
        let principal = Principal::new("user:root", 1).with_roles(["super_admin", "auditor"]);
        let json = serde_json::to_value(&principal).unwrap();

        assert_eq!(json["roles"], serde_json::json!(["super_admin", "auditor"]));

        let back: Principal = serde_json::from_value(json).unwrap();
        assert_eq!(back, principal);
    }
}
