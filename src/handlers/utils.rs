use axum::body::Bytes;
use serde::de::DeserializeOwned;

use crate::auth::{authorize, Access};
use crate::error::{ApiError, Resource};
use crate::middleware::AuthUser;

/// Parse a path segment into a positive resource id
pub fn parse_id(segment: &str, resource: Resource) -> Result<i64, ApiError> {
    match segment.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::InvalidId(resource)),
    }
}

/// Ownership gate: the caller may only act on its own record
pub fn ensure_owner(requested_id: i64, caller: AuthUser) -> Result<(), ApiError> {
    match authorize(requested_id, caller.user_id) {
        Access::Allow => Ok(()),
        Access::Deny => {
            tracing::info!("User {} denied access to user {}", caller.user_id, requested_id);
            Err(ApiError::Unauthorized)
        }
    }
}

/// Lenient body binding: an empty or unreadable body yields the zero value
/// and absent fields fall back to their defaults.
pub fn bind<T: DeserializeOwned + Default>(body: &Bytes) -> T {
    if body.is_empty() {
        return T::default();
    }
    serde_json::from_slice(body).unwrap_or_else(|e| {
        tracing::debug!("Ignoring unreadable request body: {}", e);
        T::default()
    })
}
