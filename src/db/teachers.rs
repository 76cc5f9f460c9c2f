use sqlx::SqlitePool;
use uuid::Uuid;

use super::now;
use crate::models::{NewTeacherRequest, Teacher};

const SELECT: &str =
    "SELECT id, name, subject, contact, email, status, created_at, updated_at FROM teachers";

pub async fn list(db: &SqlitePool) -> Result<Vec<Teacher>, sqlx::Error> {
    sqlx::query_as::<_, Teacher>(&format!("{SELECT} ORDER BY name COLLATE NOCASE"))
        .fetch_all(db)
        .await
}

pub async fn find(db: &SqlitePool, id: &str) -> Result<Option<Teacher>, sqlx::Error> {
    sqlx::query_as::<_, Teacher>(&format!("{SELECT} WHERE id = ?1"))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn insert(db: &SqlitePool, req: NewTeacherRequest) -> Result<Teacher, sqlx::Error> {
    let now = now();
    let teacher = Teacher {
        id: Uuid::new_v4().to_string(),
        name: req.name,
        subject: req.subject,
        contact: req.contact,
        email: req.email,
        status: "active".to_string(),
        created_at: now.clone(),
        updated_at: now,
    };

    sqlx::query(
        r#"
        INSERT INTO teachers (id, name, subject, contact, email, status, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
    )
    .bind(&teacher.id)
    .bind(&teacher.name)
    .bind(&teacher.subject)
    .bind(&teacher.contact)
    .bind(&teacher.email)
    .bind(&teacher.status)
    .bind(&teacher.created_at)
    .bind(&teacher.updated_at)
    .execute(db)
    .await?;

    Ok(teacher)
}

pub async fn save(db: &SqlitePool, teacher: &mut Teacher) -> Result<(), sqlx::Error> {
    teacher.updated_at = now();
    sqlx::query(
        r#"
        UPDATE teachers
        SET name = ?1, subject = ?2, contact = ?3, email = ?4, status = ?5, updated_at = ?6
        WHERE id = ?7
        "#,
    )
    .bind(&teacher.name)
    .bind(&teacher.subject)
    .bind(&teacher.contact)
    .bind(&teacher.email)
    .bind(&teacher.status)
    .bind(&teacher.updated_at)
    .bind(&teacher.id)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn delete(db: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM teachers WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count(db: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM teachers")
        .fetch_one(db)
        .await
}
