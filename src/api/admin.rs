use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};
use tracing::info;

use super::AppJson;
use crate::auth::AuthAdmin;
use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::db::admins;
use crate::error::{AppError, AppResult};
use crate::models::{AdminProfile, ChangePasswordRequest, LoginRequest, RegisterAdminRequest, UpdateProfileRequest};
use crate::state::AppState;

const DUPLICATE_ADMIN: &str = "Username or email already exists";

fn password_error(err: argon2::password_hash::Error) -> AppError {
    AppError::Internal(format!("password hashing failed: {err}"))
}

pub async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterAdminRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let key = req
        .security_key
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or_else(|| AppError::BadRequest("Security key is required".to_string()))?;
    if key != state.config.admin_security_key {
        return Err(AppError::Forbidden("Invalid security key".to_string()));
    }

    let req = req.normalized()?;
    let hash = hash_password(&req.password).map_err(password_error)?;
    let role = req.role.as_deref().unwrap_or("admin");

    let admin = admins::insert(&state.db, &req.username, &req.email, &hash, &req.full_name, role)
        .await
        .map_err(|e| AppError::unique_as_conflict(e, DUPLICATE_ADMIN))?;

    info!("registered admin {} ({})", admin.username, admin.role);
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Admin account created successfully",
            "admin_id": admin.id,
        })),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> AppResult<Json<Value>> {
    let username = req.username.trim();
    if username.is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    let invalid = || AppError::Unauthorized("Invalid credentials".to_string());
    let mut admin = admins::find_by_login(&state.db, username)
        .await?
        .ok_or_else(invalid)?;
    if !verify_password(&req.password, &admin.password_hash).map_err(password_error)? {
        return Err(invalid());
    }
    if !admin.is_active {
        return Err(AppError::Forbidden("Account is deactivated".to_string()));
    }

    let token = generate_token(&admin.id, &admin.username, &admin.role, &state.config.jwt)
        .map_err(|e| AppError::Internal(format!("token generation failed: {e}")))?;
    admin.last_login_at = Some(admins::record_login(&state.db, &admin.id).await?);

    info!("admin {} logged in", admin.username);
    Ok(Json(json!({
        "message": "Login successful",
        "token": token,
        "admin": AdminProfile::from(&admin),
    })))
}

pub async fn me(AuthAdmin(admin): AuthAdmin) -> Json<Value> {
    Json(json!({ "admin": AdminProfile::from(&admin) }))
}

pub async fn update_me(
    State(state): State<AppState>,
    AuthAdmin(mut admin): AuthAdmin,
    AppJson(req): AppJson<UpdateProfileRequest>,
) -> AppResult<Json<Value>> {
    let req = req.normalized()?;
    if let Some(full_name) = req.full_name {
        admin.full_name = full_name;
    }
    if let Some(email) = req.email {
        admin.email = email;
    }

    admins::update_profile(&state.db, &admin.id, &admin.full_name, &admin.email)
        .await
        .map_err(|e| AppError::unique_as_conflict(e, "Email already in use"))?;

    Ok(Json(json!({
        "message": "Profile updated successfully",
        "admin": AdminProfile::from(&admin),
    })))
}

pub async fn change_password(
    State(state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    AppJson(req): AppJson<ChangePasswordRequest>,
) -> AppResult<Json<Value>> {
    req.check()?;
    if !verify_password(&req.current_password, &admin.password_hash).map_err(password_error)? {
        return Err(AppError::Unauthorized(
            "Current password is incorrect".to_string(),
        ));
    }

    let hash = hash_password(&req.new_password).map_err(password_error)?;
    admins::update_password(&state.db, &admin.id, &hash).await?;

    info!("admin {} changed password", admin.username);
    Ok(Json(json!({ "message": "Password changed successfully" })))
}
