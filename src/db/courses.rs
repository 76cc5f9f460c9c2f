use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use super::now;
use crate::models::{CourseFilter, CourseMaterial, CourseMaterialRequest};

const SELECT: &str = "SELECT id, grade, subject, resource_type, year, link, uploaded_by, \
                      created_at, updated_at FROM course_materials";

pub async fn list(
    db: &SqlitePool,
    filter: &CourseFilter,
) -> Result<Vec<CourseMaterial>, sqlx::Error> {
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT);
    qb.push(" WHERE 1 = 1");

    let conditions = [
        ("grade", &filter.grade),
        ("subject", &filter.subject),
        ("resource_type", &filter.resource_type),
        ("year", &filter.year),
    ];
    for (column, value) in conditions {
        if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            qb.push(format!(" AND {column} = "))
                .push_bind(value.to_string());
        }
    }
    qb.push(" ORDER BY created_at DESC, rowid DESC");

    qb.build_query_as::<CourseMaterial>().fetch_all(db).await
}

pub async fn find(db: &SqlitePool, id: &str) -> Result<Option<CourseMaterial>, sqlx::Error> {
    sqlx::query_as::<_, CourseMaterial>(&format!("{SELECT} WHERE id = ?1"))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn insert(
    db: &SqlitePool,
    req: CourseMaterialRequest,
    uploaded_by: &str,
) -> Result<CourseMaterial, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = now();

    sqlx::query(
        r#"
        INSERT INTO course_materials
            (id, grade, subject, resource_type, year, link, uploaded_by, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
        "#,
    )
    .bind(&id)
    .bind(&req.grade)
    .bind(&req.subject)
    .bind(&req.resource_type)
    .bind(&req.year)
    .bind(&req.link)
    .bind(uploaded_by)
    .bind(&now)
    .execute(db)
    .await?;

    Ok(CourseMaterial {
        id,
        grade: req.grade,
        subject: req.subject,
        resource_type: req.resource_type,
        year: req.year,
        link: req.link,
        uploaded_by: uploaded_by.to_string(),
        created_at: now.clone(),
        updated_at: now,
    })
}

/// Replaces the five editable fields. `None` when no such material exists.
pub async fn update(
    db: &SqlitePool,
    id: &str,
    req: CourseMaterialRequest,
) -> Result<Option<CourseMaterial>, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE course_materials
        SET grade = ?1, subject = ?2, resource_type = ?3, year = ?4, link = ?5, updated_at = ?6
        WHERE id = ?7
        "#,
    )
    .bind(&req.grade)
    .bind(&req.subject)
    .bind(&req.resource_type)
    .bind(&req.year)
    .bind(&req.link)
    .bind(now())
    .bind(id)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    find(db, id).await
}

pub async fn delete(db: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM course_materials WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count(db: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM course_materials")
        .fetch_one(db)
        .await
}
