//! Principal extraction
//!
//! Authentication happens upstream. A trusted gateway forwards the resolved
//! identity in request headers:
//!
//! - `x-user-id`: user identifier (required)
//! - `x-organization-id`: integer organization identifier (required)
//! - `x-roles`: comma-separated role labels (optional)
//!
//! A missing or malformed identity is an authentication-time integrity error
//! and is rejected with 401 before any policy runs.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts, http::HeaderMap};
use catalog_core::{OrganizationId, Principal, RoleSet};

use crate::error::ApiError;

pub const X_USER_ID: &str = "x-user-id";
pub const X_ORGANIZATION_ID: &str = "x-organization-id";
pub const X_ROLES: &str = "x-roles";

/// The principal making the current request
#[derive(Debug, Clone)]
pub struct CurrentPrincipal(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentPrincipal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        principal_from_headers(&parts.headers).map(CurrentPrincipal)
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Build a principal from gateway headers
pub fn principal_from_headers(headers: &HeaderMap) -> Result<Principal, ApiError> {
    let id = header(headers, X_USER_ID)
        .ok_or_else(|| ApiError::Unauthorized(format!("missing {}", X_USER_ID)))?;

    let organization_id = header(headers, X_ORGANIZATION_ID)
        .ok_or_else(|| ApiError::Unauthorized(format!("missing {}", X_ORGANIZATION_ID)))?
        .parse::<OrganizationId>()
        .map_err(|_| ApiError::Unauthorized(format!("malformed {}", X_ORGANIZATION_ID)))?;

    let roles = header(headers, X_ROLES)
        .map(RoleSet::parse_list)
        .unwrap_or_default();

    Ok(Principal {
        id: id.to_string(),
        organization_id,
        roles,
    })
}
