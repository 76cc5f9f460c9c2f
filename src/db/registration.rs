use sqlx::SqlitePool;

use super::now;
use crate::models::RegistrationLink;

pub async fn get(db: &SqlitePool) -> Result<Option<RegistrationLink>, sqlx::Error> {
    sqlx::query_as::<_, RegistrationLink>(
        "SELECT link, title, updated_by, updated_at FROM registration_link WHERE id = 1",
    )
    .fetch_optional(db)
    .await
}

/// Creates the singleton link. A second insert hits the primary key and
/// surfaces as a unique violation.
pub async fn insert(
    db: &SqlitePool,
    link: &str,
    title: &str,
    updated_by: &str,
) -> Result<RegistrationLink, sqlx::Error> {
    let now = now();
    sqlx::query(
        "INSERT INTO registration_link (id, link, title, updated_by, updated_at) VALUES (1, ?1, ?2, ?3, ?4)",
    )
    .bind(link)
    .bind(title)
    .bind(updated_by)
    .bind(&now)
    .execute(db)
    .await?;

    Ok(RegistrationLink {
        link: link.to_string(),
        title: title.to_string(),
        updated_by: updated_by.to_string(),
        updated_at: now,
    })
}

pub async fn update(
    db: &SqlitePool,
    link: &str,
    title: &str,
    updated_by: &str,
) -> Result<Option<RegistrationLink>, sqlx::Error> {
    let now = now();
    let result = sqlx::query(
        "UPDATE registration_link SET link = ?1, title = ?2, updated_by = ?3, updated_at = ?4 WHERE id = 1",
    )
    .bind(link)
    .bind(title)
    .bind(updated_by)
    .bind(&now)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    Ok(Some(RegistrationLink {
        link: link.to_string(),
        title: title.to_string(),
        updated_by: updated_by.to_string(),
        updated_at: now,
    }))
}
