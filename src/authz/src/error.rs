//! Error types for the access policy

use crate::types::{Action, DecisionReason};
use thiserror::Error;

/// Authorization errors
#[derive(Debug, Error)]
pub enum AuthzError {
    /// The principal may not perform the action; terminal for the request
    #[error("Operation not permitted: {action} ({reason})")]
    Denied {
        action: Action,
        reason: DecisionReason,
    },

    /// A super admin created a product without choosing its organization
    #[error("An organization must be selected")]
    MissingOrganization,
}

/// Result type for authorization operations
pub type Result<T> = std::result::Result<T, AuthzError>;
