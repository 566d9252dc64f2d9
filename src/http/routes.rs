use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    core::{pagination::parse_page, CategoryPageResponse, UpdatePreferencesResponse},
    http::extract::AuthUser,
    state::AppState,
    utils::error::AppError,
};

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    page: Option<String>,
}

pub async fn health_handler() -> impl IntoResponse {
    Json(json!({ "message": "API is running" }))
}

pub async fn not_found_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" })))
}

pub async fn list_categories_handler(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<CategoryPageResponse>, AppError> {
    // 查詢字串無法解析時一律當作第 1 頁
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let page = parse_page(query.page.as_deref());

    let response = state.service.list_page(&user_id, page).await?;
    Ok(Json(response))
}

pub async fn user_categories_handler(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.service.user_preferences(&user_id).await?))
}

pub async fn update_preferences_handler(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<UpdatePreferencesResponse>, AppError> {
    let Json(body) = payload.map_err(|rejection| AppError::MalformedPayload {
        message: rejection.body_text(),
    })?;

    let response = state.service.update_preferences(&user_id, &body).await?;
    Ok(Json(response))
}
