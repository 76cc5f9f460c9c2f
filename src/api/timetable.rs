use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use super::AppJson;
use crate::auth::AuthAdmin;
use crate::db::timetable;
use crate::error::{AppError, AppResult};
use crate::models::{TimetableEntryRequest, TimetableFilter, TimetableSlot, TimetableStats};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct BulkTimetableRequest {
    #[serde(default)]
    entries: Vec<TimetableEntryRequest>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<TimetableFilter>,
) -> AppResult<Json<Value>> {
    let entries = timetable::list(&state.db, &filter).await?;
    Ok(Json(json!({ "entries": entries })))
}

pub async fn stats(State(state): State<AppState>) -> AppResult<Json<TimetableStats>> {
    Ok(Json(timetable::stats(&state.db).await?))
}

pub async fn create(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    AppJson(req): AppJson<TimetableEntryRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let slot = req.into_slot()?;
    let entry = timetable::insert(&state.db, slot).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Timetable entry created", "entry": entry })),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
    AppJson(req): AppJson<TimetableEntryRequest>,
) -> AppResult<Json<Value>> {
    let slot = req.into_slot()?;
    let entry = timetable::update(&state.db, &id, slot)
        .await?
        .ok_or_else(|| AppError::not_found("Timetable entry"))?;
    Ok(Json(json!({ "message": "Timetable entry updated", "entry": entry })))
}

/// Validates every entry before touching the table, so one bad row leaves
/// the stored timetable as it was.
pub async fn replace_all(
    State(state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    AppJson(req): AppJson<BulkTimetableRequest>,
) -> AppResult<Json<Value>> {
    let slots = req
        .entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            entry.into_slot().map_err(|e| match e {
                AppError::BadRequest(msg) => AppError::BadRequest(format!("entry {}: {msg}", i + 1)),
                other => other,
            })
        })
        .collect::<Result<Vec<TimetableSlot>, AppError>>()?;

    let entries = timetable::replace_all(&state.db, slots).await?;
    info!("{} replaced the timetable with {} entries", admin.username, entries.len());
    Ok(Json(json!({ "message": "Timetable saved", "entries": entries })))
}

pub async fn remove(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    if !timetable::delete(&state.db, &id).await? {
        return Err(AppError::not_found("Timetable entry"));
    }
    Ok(Json(json!({ "message": "Timetable entry deleted" })))
}
