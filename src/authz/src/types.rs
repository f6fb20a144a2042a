//! Authorization decision types

use catalog_core::OrganizationId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Record-level operation on a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a decision came out the way it did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DecisionReason {
    /// Principal holds `super_admin`
    SuperAdmin,

    /// Principal belongs to the organization owning the product
    OwningOrganizationAdmin,

    /// Principal belongs to a different organization
    ForeignOrganization {
        principal_organization: OrganizationId,
        product_organization: OrganizationId,
    },

    /// Principal holds neither administrative role
    MissingRole,
}

impl DecisionReason {
    pub fn allows(&self) -> bool {
        matches!(
            self,
            DecisionReason::SuperAdmin | DecisionReason::OwningOrganizationAdmin
        )
    }
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionReason::SuperAdmin => write!(f, "principal is a super admin"),
            DecisionReason::OwningOrganizationAdmin => {
                write!(f, "principal belongs to the owning organization")
            }
            DecisionReason::ForeignOrganization {
                principal_organization,
                product_organization,
            } => write!(
                f,
                "product belongs to organization {}, principal belongs to organization {}",
                product_organization, principal_organization
            ),
            DecisionReason::MissingRole => write!(f, "principal holds no administrative role"),
        }
    }
}

/// Authorization decision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    /// Unique decision identifier
    pub id: String,

    /// Whether the action is allowed
    pub allowed: bool,

    pub action: Action,

    pub reason: DecisionReason,

    pub decided_at: DateTime<Utc>,
}

impl Decision {
    /// Create a decision; the outcome follows from the reason
    pub fn new(action: Action, reason: DecisionReason) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            allowed: reason.allows(),
            action,
            reason,
            decided_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_creation() {
        let decision = Decision::new(Action::Edit, DecisionReason::SuperAdmin);
        assert!(decision.allowed);
        assert_eq!(decision.action, Action::Edit);
        assert!(!decision.id.is_empty());

        let deny = Decision::new(Action::Delete, DecisionReason::MissingRole);
        assert!(!deny.allowed);
    }

    #[test]
    fn test_foreign_organization_message() {
        let reason = DecisionReason::ForeignOrganization {
            principal_organization: OrganizationId(3),
            product_organization: OrganizationId(4),
        };
        assert!(!reason.allows());
        assert_eq!(
            reason.to_string(),
            "product belongs to organization 4, principal belongs to organization 3"
        );
    }

    #[test]
    fn test_action_serialization() {
        assert_eq!(serde_json::to_string(&Action::View).unwrap(), "\"view\"");
        assert_eq!(Action::Delete.to_string(), "delete");
    }
}
