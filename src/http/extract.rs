use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{adapters::auth::bearer_token, core::UserId, state::AppState, utils::error::AppError};

/// 已通過驗證的呼叫者
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserId);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or(AppError::Unauthorized)?;

        match state.authenticator.authenticate(token).await? {
            Some(user_id) => Ok(AuthUser(user_id)),
            None => {
                tracing::debug!("Rejected unknown bearer token");
                Err(AppError::Unauthorized)
            }
        }
    }
}
