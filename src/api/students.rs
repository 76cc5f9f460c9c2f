use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::{Value, json};

use super::AppJson;
use crate::auth::AuthAdmin;
use crate::db::students;
use crate::error::{AppError, AppResult};
use crate::models::{NewStudentRequest, PageInfo, Student, StudentQuery, UpdateStudentRequest};
use crate::state::AppState;

const DUPLICATE_STUDENT: &str = "A student with this email or student ID already exists";

#[derive(Serialize)]
pub struct StudentPage {
    students: Vec<Student>,
    #[serde(flatten)]
    page: PageInfo,
}

pub async fn list(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Query(query): Query<StudentQuery>,
) -> AppResult<Json<StudentPage>> {
    let window = query.pagination().resolve(10, 100);
    let (students, total) = students::list_page(&state.db, query.search.as_deref(), window).await?;
    Ok(Json(StudentPage {
        students,
        page: PageInfo::new(window, total),
    }))
}

pub async fn create(
    State(state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    AppJson(req): AppJson<NewStudentRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let req = req.normalized()?;
    let student = students::insert(&state.db, req, &admin.username)
        .await
        .map_err(|e| AppError::unique_as_conflict(e, DUPLICATE_STUDENT))?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Student created successfully",
            "student_id": student.id,
            "student": student,
        })),
    ))
}

pub async fn show(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let student = students::find(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::not_found("Student"))?;
    Ok(Json(json!({ "student": student })))
}

pub async fn update(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
    AppJson(req): AppJson<UpdateStudentRequest>,
) -> AppResult<Json<Value>> {
    let req = req.normalized()?;
    let mut student = students::find(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::not_found("Student"))?;

    req.apply(&mut student);
    students::save(&state.db, &mut student)
        .await
        .map_err(|e| AppError::unique_as_conflict(e, DUPLICATE_STUDENT))?;

    Ok(Json(json!({ "message": "Student updated successfully", "student": student })))
}

pub async fn remove(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    if !students::delete(&state.db, &id).await? {
        return Err(AppError::not_found("Student"));
    }
    Ok(Json(json!({ "message": "Student deleted successfully" })))
}
