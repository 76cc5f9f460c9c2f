use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde_json::{Value, json};

use super::AppJson;
use crate::auth::AuthAdmin;
use crate::db::courses;
use crate::error::{AppError, AppResult};
use crate::models::{CourseFilter, CourseMaterial, CourseMaterialRequest};
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<CourseFilter>,
) -> AppResult<Json<Vec<CourseMaterial>>> {
    let materials = courses::list(&state.db, &filter).await?;
    Ok(Json(materials))
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CourseMaterial>> {
    let material = courses::find(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::not_found("Course"))?;
    Ok(Json(material))
}

pub async fn create(
    State(state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    AppJson(req): AppJson<CourseMaterialRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let req = req.normalized()?;
    let course = courses::insert(&state.db, req, &admin.username).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Course added", "course": course })),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
    AppJson(req): AppJson<CourseMaterialRequest>,
) -> AppResult<Json<Value>> {
    let req = req.normalized()?;
    let course = courses::update(&state.db, &id, req)
        .await?
        .ok_or_else(|| AppError::not_found("Course"))?;
    Ok(Json(json!({ "message": "Course updated", "course": course })))
}

pub async fn remove(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    if !courses::delete(&state.db, &id).await? {
        return Err(AppError::not_found("Course"));
    }
    Ok(Json(json!({ "message": "Course deleted" })))
}
