use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::database::{Affected, DatabaseError};
use crate::error::ApiError;

/// Success envelope: `{"message": "success", "data": ...}`
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { data }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let data_value = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return ApiError::Internal(e.to_string()).into_response();
            }
        };

        (StatusCode::OK, Json(json!({ "message": "success", "data": data_value }))).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

/// Map a storage outcome onto the envelope: error → 400 "failed", zero rows →
/// 200 "failed", otherwise 200 "success" with the value.
pub fn respond<T>(outcome: Result<Affected<T>, DatabaseError>) -> ApiResult<T> {
    let affected = outcome?;
    if affected.rows == 0 {
        return Err(ApiError::NotFound);
    }
    Ok(ApiResponse::success(affected.value))
}

/// `respond` for single-record lookups, unwrapping the found record
pub fn respond_one<T>(outcome: Result<Affected<Option<T>>, DatabaseError>) -> ApiResult<T> {
    match respond(outcome)?.data {
        Some(value) => Ok(ApiResponse::success(value)),
        None => Err(ApiError::NotFound),
    }
}
