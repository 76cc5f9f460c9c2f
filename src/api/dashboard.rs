use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};

use super::AppJson;
use crate::auth::AuthAdmin;
use crate::error::{AppError, AppResult};
use crate::services::dashboard;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct QuickActionRequest {
    #[serde(default)]
    action: String,
}

pub async fn stats(State(state): State<AppState>, _admin: AuthAdmin) -> AppResult<Json<Value>> {
    let stats = dashboard::stats(&state.db).await?;
    Ok(Json(json!({ "stats": stats })))
}

pub async fn activity(State(state): State<AppState>, _admin: AuthAdmin) -> AppResult<Json<Value>> {
    let activity = dashboard::activity(&state.db).await?;
    Ok(Json(json!({ "activity": activity })))
}

pub async fn quick_action(
    _admin: AuthAdmin,
    AppJson(req): AppJson<QuickActionRequest>,
) -> AppResult<Json<Value>> {
    let (message, redirect) = dashboard::quick_action(req.action.trim())
        .ok_or_else(|| AppError::BadRequest(format!("Unknown action: {}", req.action)))?;
    Ok(Json(json!({ "message": message, "redirect": redirect })))
}
