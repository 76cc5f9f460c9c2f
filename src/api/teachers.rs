use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::{Value, json};

use super::AppJson;
use crate::auth::AuthAdmin;
use crate::db::teachers;
use crate::error::{AppError, AppResult};
use crate::models::{NewTeacherRequest, UpdateTeacherRequest};
use crate::state::AppState;

const DUPLICATE_TEACHER: &str = "A teacher with this email already exists";

pub async fn list(State(state): State<AppState>, _admin: AuthAdmin) -> AppResult<Json<Value>> {
    let teachers = teachers::list(&state.db).await?;
    Ok(Json(json!({ "teachers": teachers })))
}

pub async fn create(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    AppJson(req): AppJson<NewTeacherRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let req = req.normalized()?;
    let teacher = teachers::insert(&state.db, req)
        .await
        .map_err(|e| AppError::unique_as_conflict(e, DUPLICATE_TEACHER))?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Teacher added successfully",
            "teacher_id": teacher.id,
        })),
    ))
}

pub async fn show(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let teacher = teachers::find(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::not_found("Teacher"))?;
    Ok(Json(json!({ "teacher": teacher })))
}

pub async fn update(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
    AppJson(req): AppJson<UpdateTeacherRequest>,
) -> AppResult<Json<Value>> {
    let req = req.normalized()?;
    let mut teacher = teachers::find(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::not_found("Teacher"))?;

    req.apply(&mut teacher);
    teachers::save(&state.db, &mut teacher)
        .await
        .map_err(|e| AppError::unique_as_conflict(e, DUPLICATE_TEACHER))?;

    Ok(Json(json!({ "message": "Teacher updated successfully", "teacher": teacher })))
}

pub async fn remove(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    if !teachers::delete(&state.db, &id).await? {
        return Err(AppError::not_found("Teacher"));
    }
    Ok(Json(json!({ "message": "Teacher deleted successfully" })))
}
