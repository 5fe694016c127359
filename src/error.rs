// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::{IdentityError, JwtError};
use crate::database::DatabaseError;

/// Resource kinds served by the API; selects the wording of id errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    Book,
}

impl Resource {
    pub fn invalid_id_message(self) -> &'static str {
        match self {
            Resource::User => "invalid user id",
            Resource::Book => "invalid book id",
        }
    }
}

/// Every way a request can end without a success envelope.
///
/// Clients branch on `message`, so the texts are part of the wire contract. Note that
/// `NotFound` is reported with 200, not 404.
#[derive(Debug)]
pub enum ApiError {
    // 400, before any data access
    InvalidId(Resource),

    // 400, ownership gate denied
    Unauthorized,

    // 400, storage reported an error (detail is logged, not returned)
    DataAccess(String),

    // 200, storage touched zero rows
    NotFound,

    // 400, no usable bearer token in the request
    MissingToken(String),

    // 401, token failed verification or carries no identity
    InvalidToken(String),

    // 500
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::BAD_REQUEST,
            ApiError::DataAccess(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::OK,
            ApiError::MissingToken(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::InvalidId(resource) => resource.invalid_id_message(),
            ApiError::Unauthorized => "unauthorized",
            ApiError::DataAccess(_) | ApiError::NotFound | ApiError::Internal(_) => "failed",
            ApiError::MissingToken(_) => "missing or malformed jwt",
            ApiError::InvalidToken(_) => "invalid or expired jwt",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({ "message": self.message() })
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        ApiError::DataAccess(err.to_string())
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        ApiError::InvalidToken(err.to_string())
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::InvalidToken(msg) => ApiError::InvalidToken(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match &self {
            ApiError::DataAccess(detail) => tracing::warn!("Data access failed: {}", detail),
            ApiError::Internal(detail) => tracing::error!("Internal error: {}", detail),
            ApiError::MissingToken(detail) | ApiError::InvalidToken(detail) => {
                tracing::debug!("Rejected bearer token: {}", detail)
            }
            _ => {}
        }
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
