use sqlx::{FromRow, SqlitePool};

use super::now;
use crate::models::{AppSettings, UpdateSettingsRequest};

#[derive(FromRow)]
struct SettingsRow {
    site_name: String,
    logo_url: String,
    cors_origins: String,
    enable_registrations: bool,
    updated_at: String,
}

impl TryFrom<SettingsRow> for AppSettings {
    type Error = sqlx::Error;

    fn try_from(row: SettingsRow) -> Result<Self, Self::Error> {
        let cors_origins = serde_json::from_str(&row.cors_origins)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        Ok(AppSettings {
            site_name: row.site_name,
            logo_url: row.logo_url,
            cors_origins,
            enable_registrations: row.enable_registrations,
            updated_at: Some(row.updated_at),
        })
    }
}

/// Stored settings, or the defaults when they were never saved.
pub async fn get(db: &SqlitePool) -> Result<AppSettings, sqlx::Error> {
    let row = sqlx::query_as::<_, SettingsRow>(
        r#"
        SELECT site_name, logo_url, cors_origins, enable_registrations, updated_at
        FROM app_settings WHERE id = 1
        "#,
    )
    .fetch_optional(db)
    .await?;

    match row {
        Some(row) => row.try_into(),
        None => Ok(AppSettings::default()),
    }
}

pub async fn save(db: &SqlitePool, req: UpdateSettingsRequest) -> Result<AppSettings, sqlx::Error> {
    let current = get(db).await?;
    let settings = AppSettings {
        site_name: req.site_name,
        logo_url: req.logo_url.unwrap_or_default(),
        cors_origins: req.cors_origins,
        enable_registrations: req
            .enable_registrations
            .unwrap_or(current.enable_registrations),
        updated_at: Some(now()),
    };
    let origins = serde_json::to_string(&settings.cors_origins)
        .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

    sqlx::query(
        r#"
        INSERT INTO app_settings (id, site_name, logo_url, cors_origins, enable_registrations, updated_at)
        VALUES (1, ?1, ?2, ?3, ?4, ?5)
        ON CONFLICT(id) DO UPDATE SET
            site_name = excluded.site_name,
            logo_url = excluded.logo_url,
            cors_origins = excluded.cors_origins,
            enable_registrations = excluded.enable_registrations,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(&settings.site_name)
    .bind(&settings.logo_url)
    .bind(&origins)
    .bind(settings.enable_registrations)
    .bind(&settings.updated_at)
    .execute(db)
    .await?;

    Ok(settings)
}
