use axum::{
    body::Bytes,
    extract::{Path, State},
    Extension,
};

use crate::app::AppState;
use crate::database::models::{User, UserInput};
use crate::error::Resource;
use crate::middleware::{respond, respond_one, ApiResponse, ApiResult, AuthUser};

use super::utils::{bind, ensure_owner, parse_id};

/// GET /users
pub async fn users_get(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    respond(state.users.find_all().await)
}

/// POST /users
pub async fn user_post(State(state): State<AppState>, body: Bytes) -> ApiResult<User> {
    let input: UserInput = bind(&body);
    let user = state.users.create(input).await?;
    tracing::info!("Created user {}", user.id);
    Ok(ApiResponse::success(user))
}

/// GET /users/:id, GET /jwt/users/:id
pub async fn user_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(caller): Extension<AuthUser>,
) -> ApiResult<User> {
    let id = parse_id(&id, Resource::User)?;
    ensure_owner(id, caller)?;
    respond_one(state.users.find(id).await)
}

/// PUT /jwt/users/:id
pub async fn user_put(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(caller): Extension<AuthUser>,
    body: Bytes,
) -> ApiResult<User> {
    let id = parse_id(&id, Resource::User)?;
    ensure_owner(id, caller)?;
    let patch: UserInput = bind(&body);
    respond_one(state.users.update(id, patch).await)
}

/// DELETE /jwt/users/:id
pub async fn user_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(caller): Extension<AuthUser>,
) -> ApiResult<&'static str> {
    let id = parse_id(&id, Resource::User)?;
    ensure_owner(id, caller)?;
    respond(state.users.delete(id).await)
}
