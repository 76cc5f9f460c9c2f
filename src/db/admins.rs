use sqlx::SqlitePool;
use uuid::Uuid;

use super::now;
use crate::models::Admin;

const COLUMNS: &str = "id, username, email, password_hash, full_name, role, is_active, \
                       last_login_at, created_at, updated_at";

pub async fn find_by_id(db: &SqlitePool, id: &str) -> Result<Option<Admin>, sqlx::Error> {
    sqlx::query_as::<_, Admin>(&format!("SELECT {COLUMNS} FROM admins WHERE id = ?1"))
        .bind(id)
        .fetch_optional(db)
        .await
}

/// Looks an admin up by username, falling back to email. An exact username
/// match always wins over an email match.
pub async fn find_by_login(db: &SqlitePool, login: &str) -> Result<Option<Admin>, sqlx::Error> {
    sqlx::query_as::<_, Admin>(&format!(
        "SELECT {COLUMNS} FROM admins WHERE username = ?1 OR email = lower(?1) \
         ORDER BY username = ?1 DESC LIMIT 1"
    ))
    .bind(login)
    .fetch_optional(db)
    .await
}

pub async fn insert(
    db: &SqlitePool,
    username: &str,
    email: &str,
    password_hash: &str,
    full_name: &str,
    role: &str,
) -> Result<Admin, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = now();

    sqlx::query(
        r#"
        INSERT INTO admins
            (id, username, email, password_hash, full_name, role, is_active,
             last_login_at, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, NULL, ?7, ?7)
        "#,
    )
    .bind(&id)
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(full_name)
    .bind(role)
    .bind(&now)
    .execute(db)
    .await?;

    Ok(Admin {
        id,
        username: username.to_string(),
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        full_name: full_name.to_string(),
        role: role.to_string(),
        is_active: true,
        last_login_at: None,
        created_at: now.clone(),
        updated_at: now,
    })
}

pub async fn record_login(db: &SqlitePool, id: &str) -> Result<String, sqlx::Error> {
    let now = now();
    sqlx::query("UPDATE admins SET last_login_at = ?1 WHERE id = ?2")
        .bind(&now)
        .bind(id)
        .execute(db)
        .await?;
    Ok(now)
}

pub async fn update_profile(
    db: &SqlitePool,
    id: &str,
    full_name: &str,
    email: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE admins SET full_name = ?1, email = ?2, updated_at = ?3 WHERE id = ?4")
        .bind(full_name)
        .bind(email)
        .bind(now())
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn update_password(
    db: &SqlitePool,
    id: &str,
    password_hash: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE admins SET password_hash = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(password_hash)
        .bind(now())
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn count(db: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM admins")
        .fetch_one(db)
        .await
}

/// Most recent login across all admins.
pub async fn last_login(db: &SqlitePool) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT MAX(last_login_at) FROM admins")
        .fetch_one(db)
        .await
}
