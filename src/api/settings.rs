use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use super::AppJson;
use crate::auth::AuthAdmin;
use crate::db::settings;
use crate::error::AppResult;
use crate::models::{AppSettings, UpdateSettingsRequest};
use crate::state::AppState;

pub async fn show(State(state): State<AppState>, _admin: AuthAdmin) -> AppResult<Json<AppSettings>> {
    Ok(Json(settings::get(&state.db).await?))
}

pub async fn update(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    AppJson(req): AppJson<UpdateSettingsRequest>,
) -> AppResult<Json<Value>> {
    let req = req.normalized()?;
    let saved = settings::save(&state.db, req).await?;
    Ok(Json(json!({ "message": "Settings saved", "settings": saved })))
}
