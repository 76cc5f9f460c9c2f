use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};

use super::AppJson;
use crate::auth::AuthAdmin;
use crate::db::{registration, settings};
use crate::error::{AppError, AppResult};
use crate::models::{RegistrationLink, RegistrationLinkRequest};
use crate::models::registration::DEFAULT_LINK_TITLE;
use crate::state::AppState;

const LINK_EXISTS: &str = "Registration link already exists, use PUT to update it";

fn link_body(message: &str, link: RegistrationLink) -> Json<Value> {
    Json(json!({
        "message": message,
        "link": link.link,
        "title": link.title,
        "updated_at": link.updated_at,
    }))
}

pub async fn show(
    State(state): State<AppState>,
    _admin: AuthAdmin,
) -> AppResult<Json<RegistrationLink>> {
    let link = registration::get(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Registration link"))?;
    Ok(Json(link))
}

pub async fn create(
    State(state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    AppJson(req): AppJson<RegistrationLinkRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let req = req.normalized()?;
    if registration::get(&state.db).await?.is_some() {
        return Err(AppError::Conflict(LINK_EXISTS.to_string()));
    }

    let title = req.title.as_deref().unwrap_or(DEFAULT_LINK_TITLE);
    let link = registration::insert(&state.db, &req.link, title, &admin.username)
        .await
        .map_err(|e| AppError::unique_as_conflict(e, LINK_EXISTS))?;
    Ok((
        StatusCode::CREATED,
        link_body("Registration link added successfully", link),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    AppJson(req): AppJson<RegistrationLinkRequest>,
) -> AppResult<Json<Value>> {
    let req = req.normalized()?;
    let title = req.title.as_deref().unwrap_or(DEFAULT_LINK_TITLE);
    let link = registration::update(&state.db, &req.link, title, &admin.username)
        .await?
        .ok_or_else(|| AppError::not_found("Registration link"))?;
    Ok(link_body("Registration link updated successfully", link))
}

/// Used by the public home page's register button.
pub async fn public_link(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let enabled = settings::get(&state.db).await?.enable_registrations;
    let body = match registration::get(&state.db).await? {
        Some(link) if enabled => json!({ "available": true, "link": link.link }),
        _ => json!({ "available": false }),
    };
    Ok(Json(body))
}
