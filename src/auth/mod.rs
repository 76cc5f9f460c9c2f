//! Admin authentication.
//!
//! - [`password`]: Argon2id hashing and verification.
//! - [`jwt`]: bearer token issue and validation.
//! - [`AuthAdmin`]: extractor guarding every back-office handler.

pub mod jwt;
pub mod password;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::db::admins;
use crate::error::AppError;
use crate::models::Admin;
use crate::state::AppState;

/// The admin behind a verified `Authorization: Bearer <token>` header.
///
/// The token's signature and expiry are checked and the account is
/// re-read from the database, so deleted or deactivated admins lose
/// access immediately.
#[derive(Debug, Clone)]
pub struct AuthAdmin(pub Admin);

impl FromRequestParts<AppState> for AuthAdmin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Token is missing!".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                AppError::Unauthorized("Expected Authorization: Bearer <token>".to_string())
            })?;

        let claims = jwt::validate_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!("rejected token: {}", e);
            AppError::Unauthorized("Invalid or expired token".to_string())
        })?;

        let admin = admins::find_by_id(&state.db, &claims.sub)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid token!".to_string()))?;

        if !admin.is_active {
            return Err(AppError::Forbidden("Account is deactivated".to_string()));
        }

        Ok(AuthAdmin(admin))
    }
}
