use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::auth::password::hash_password;
use crate::config::ServerConfig;
use crate::db::{admins, settings};
use crate::error::AppError;

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@edunova.local";

/// Seeds a `super_admin` account on an empty database so the dashboard is
/// reachable after a fresh install. Returns whether an account was created.
pub async fn ensure_default_admin(db: &SqlitePool, password: &str) -> Result<bool, AppError> {
    if admins::count(db).await? > 0 {
        return Ok(false);
    }

    let hash = hash_password(password).map_err(|e| AppError::Internal(e.to_string()))?;
    admins::insert(
        db,
        DEFAULT_ADMIN_USERNAME,
        DEFAULT_ADMIN_EMAIL,
        &hash,
        "System Administrator",
        "super_admin",
    )
    .await?;

    info!("created default admin account '{}'", DEFAULT_ADMIN_USERNAME);
    if password == "admin123" {
        warn!("default admin uses the stock password, change it after first login");
    }
    Ok(true)
}

/// Adds the origins saved through the settings page to the configured CORS
/// allow-list. The layer is built once, so later edits apply on restart.
pub async fn merge_stored_origins(db: &SqlitePool, config: &mut ServerConfig) -> Result<(), AppError> {
    let stored = settings::get(db).await?;
    let before = config.cors_origins.len();
    config.merge_origins(stored.cors_origins);
    if config.cors_origins.len() > before {
        info!(
            "added {} CORS origin(s) from saved settings",
            config.cors_origins.len() - before
        );
    }
    Ok(())
}
