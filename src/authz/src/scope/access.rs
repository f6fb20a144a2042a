//! Access scope evaluation

use catalog_core::{OrganizationId, Principal, Product, ProductQuery};
use tracing::{debug, warn};

use super::types::ListScoping;
use crate::error::{AuthzError, Result};
use crate::form::{self, FieldSpec};
use crate::types::{Action, Decision, DecisionReason};

/// Authorization and visibility policy for products
///
/// Stateless: every method is a pure function of the principal and the
/// record or query passed in, so one instance is shared across requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessScope {
    list_scoping: ListScoping,
}

impl AccessScope {
    /// Policy with the default list scoping
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list_scoping(list_scoping: ListScoping) -> Self {
        Self { list_scoping }
    }

    pub fn list_scoping(&self) -> ListScoping {
        self.list_scoping
    }

    /// Shared record-level predicate behind view, edit and delete
    pub fn decide(&self, principal: &Principal, action: Action, product: &Product) -> Decision {
        let reason = if principal.is_super_admin() {
            DecisionReason::SuperAdmin
        } else if !principal.is_organization_admin() {
            DecisionReason::MissingRole
        } else if product.organization_id == principal.organization_id {
            DecisionReason::OwningOrganizationAdmin
        } else {
            DecisionReason::ForeignOrganization {
                principal_organization: principal.organization_id,
                product_organization: product.organization_id,
            }
        };

        let decision = Decision::new(action, reason);
        debug!(
            principal = %principal.id,
            product = %product.id,
            action = %action,
            allowed = decision.allowed,
            reason = %decision.reason,
            "Access decision"
        );
        decision
    }

    pub fn can_view(&self, principal: &Principal, product: &Product) -> bool {
        self.decide(principal, Action::View, product).allowed
    }

    pub fn can_edit(&self, principal: &Principal, product: &Product) -> bool {
        self.decide(principal, Action::Edit, product).allowed
    }

    pub fn can_delete(&self, principal: &Principal, product: &Product) -> bool {
        self.decide(principal, Action::Delete, product).allowed
    }

    /// Like [`decide`](Self::decide), but a denial is an error
    pub fn authorize(
        &self,
        principal: &Principal,
        action: Action,
        product: &Product,
    ) -> Result<Decision> {
        let decision = self.decide(principal, action, product);
        if decision.allowed {
            Ok(decision)
        } else {
            warn!(
                principal = %principal.id,
                product = %product.id,
                action = %action,
                reason = %decision.reason,
                "Access denied"
            );
            Err(AuthzError::Denied {
                action,
                reason: decision.reason,
            })
        }
    }

    /// Narrow a base query to the rows the principal may list
    ///
    /// `organization_admin` always narrows, even alongside `super_admin`.
    pub fn scope_list(&self, principal: &Principal, base: ProductQuery) -> ProductQuery {
        let narrowed = match self.list_scoping {
            ListScoping::OrganizationAdmins => principal.is_organization_admin(),
            ListScoping::AllExceptSuperAdmins => {
                principal.is_organization_admin() || !principal.is_super_admin()
            }
        };

        if narrowed {
            debug!(
                principal = %principal.id,
                organization = %principal.organization_id,
                "List scoped to organization"
            );
            return base.where_organization(principal.organization_id);
        }

        if !principal.is_super_admin() {
            warn!(
                principal = %principal.id,
                organization = %principal.organization_id,
                "Principal without an administrative role lists products unscoped"
            );
        }
        base
    }

    /// Organization field of the product form for this principal
    pub fn resolve_organization_field(&self, principal: &Principal) -> FieldSpec {
        form::resolve_organization_field(principal)
    }

    /// Owning organization for a product the principal is creating
    ///
    /// Super admins choose freely but must choose. Everyone else creates in
    /// their own organization; naming another one is denied.
    pub fn resolve_create_organization(
        &self,
        principal: &Principal,
        requested: Option<OrganizationId>,
    ) -> Result<OrganizationId> {
        if principal.is_super_admin() {
            return requested.ok_or(AuthzError::MissingOrganization);
        }

        match requested {
            Some(organization_id) if organization_id != principal.organization_id => {
                warn!(
                    principal = %principal.id,
                    requested = %organization_id,
                    "Create outside own organization denied"
                );
                Err(AuthzError::Denied {
                    action: Action::Create,
                    reason: DecisionReason::ForeignOrganization {
                        principal_organization: principal.organization_id,
                        product_organization: organization_id,
                    },
                })
            }
            _ => Ok(principal.organization_id),
        }
    }
}
