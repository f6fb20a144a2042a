//! List scoping modes
use serde::{Deserialize, Serialize};

/// Which principals get their product lists narrowed to their organization
///
/// `super_admin` alone is never narrowed. The two modes differ only for
/// principals holding neither administrative role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListScoping {
    /// Only `organization_admin` holders are narrowed; role-less principals
    /// see every organization's products
    #[default]
    OrganizationAdmins,

    /// Everyone except a pure `super_admin` is narrowed
    AllExceptSuperAdmins,
}
