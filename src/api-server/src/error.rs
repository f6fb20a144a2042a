use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use catalog_authz::AuthzError;
use catalog_core::CoreError;
use serde_json::json;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Authz(#[from] AuthzError),

    #[error("{0}")]
    Catalog(#[from] CoreError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Authz(AuthzError::Denied { .. }) => StatusCode::FORBIDDEN,
            ApiError::Authz(AuthzError::MissingOrganization) => StatusCode::BAD_REQUEST,
            ApiError::Catalog(CoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Catalog(CoreError::Invalid(_)) => StatusCode::BAD_REQUEST,
            ApiError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Authz(AuthzError::Denied { .. }) => "Operation not permitted".to_string(),
            // Storage details stay in the logs
            ApiError::Catalog(CoreError::Storage(_)) => "Storage unavailable".to_string(),
            other => other.to_string(),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
