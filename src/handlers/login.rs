use axum::{body::Bytes, extract::State};
use serde::Serialize;

use crate::app::AppState;
use crate::auth::generate_jwt;
use crate::database::models::{LoginInput, User};
use crate::middleware::{ApiResponse, ApiResult};

use super::utils::bind;

#[derive(Debug, Serialize)]
pub struct LoginData {
    #[serde(flatten)]
    pub user: User,
    pub token: String,
}

/// POST /login - credential match, then a fresh bearer token for the matched user
pub async fn login_post(State(state): State<AppState>, body: Bytes) -> ApiResult<LoginData> {
    let input: LoginInput = bind(&body);
    let user = state.users.login(&input.email, &input.password).await?;
    let token = generate_jwt(user.id, &state.config.security)?;

    tracing::info!("User {} logged in", user.id);
    Ok(ApiResponse::success(LoginData { user, token }))
}
