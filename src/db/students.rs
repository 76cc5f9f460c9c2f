use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use super::now;
use crate::models::{NewStudentRequest, Page, Student};

const SELECT: &str = "SELECT id, full_name, email, student_id, course, phone, address, \
                      date_of_birth, enrollment_date, status, created_by, created_at, \
                      updated_at FROM students";

fn push_search(qb: &mut QueryBuilder<'_, Sqlite>, search: Option<&str>) {
    if let Some(term) = search.map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
        qb.push(" WHERE lower(full_name) LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR lower(email) LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR lower(student_id) LIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\'");
    }
}

/// Makes `%`, `_` and `\` match literally inside a `LIKE ... ESCAPE '\'`.
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Newest first; `search` matches name, email or student number.
pub async fn list_page(
    db: &SqlitePool,
    search: Option<&str>,
    window: Page,
) -> Result<(Vec<Student>, i64), sqlx::Error> {
    let mut count_qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*) FROM students");
    push_search(&mut count_qb, search);
    let total: i64 = count_qb.build_query_scalar().fetch_one(db).await?;

    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT);
    push_search(&mut qb, search);
    qb.push(" ORDER BY created_at DESC, rowid DESC LIMIT ")
        .push_bind(window.limit)
        .push(" OFFSET ")
        .push_bind(window.offset);
    let rows = qb.build_query_as::<Student>().fetch_all(db).await?;

    Ok((rows, total))
}

pub async fn find(db: &SqlitePool, id: &str) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(&format!("{SELECT} WHERE id = ?1"))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn recent(db: &SqlitePool, limit: i64) -> Result<Vec<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(&format!(
        "{SELECT} ORDER BY created_at DESC, rowid DESC LIMIT ?1"
    ))
    .bind(limit)
    .fetch_all(db)
    .await
}

pub async fn insert(
    db: &SqlitePool,
    req: NewStudentRequest,
    created_by: &str,
) -> Result<Student, sqlx::Error> {
    let now = now();
    let student = Student {
        id: Uuid::new_v4().to_string(),
        full_name: req.full_name,
        email: req.email,
        student_id: req.student_id,
        course: req.course,
        phone: req.phone,
        address: req.address.unwrap_or_default(),
        date_of_birth: req.date_of_birth,
        enrollment_date: req.enrollment_date.unwrap_or_else(|| now.clone()),
        status: req.status.unwrap_or_else(|| "active".to_string()),
        created_by: created_by.to_string(),
        created_at: now.clone(),
        updated_at: now,
    };

    sqlx::query(
        r#"
        INSERT INTO students
            (id, full_name, email, student_id, course, phone, address, date_of_birth,
             enrollment_date, status, created_by, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
        "#,
    )
    .bind(&student.id)
    .bind(&student.full_name)
    .bind(&student.email)
    .bind(&student.student_id)
    .bind(&student.course)
    .bind(&student.phone)
    .bind(&student.address)
    .bind(&student.date_of_birth)
    .bind(&student.enrollment_date)
    .bind(&student.status)
    .bind(&student.created_by)
    .bind(&student.created_at)
    .bind(&student.updated_at)
    .execute(db)
    .await?;

    Ok(student)
}

/// Writes back every mutable column of an already loaded student.
pub async fn save(db: &SqlitePool, student: &mut Student) -> Result<(), sqlx::Error> {
    student.updated_at = now();
    sqlx::query(
        r#"
        UPDATE students
        SET full_name = ?1, email = ?2, student_id = ?3, course = ?4, phone = ?5,
            address = ?6, date_of_birth = ?7, enrollment_date = ?8, status = ?9,
            updated_at = ?10
        WHERE id = ?11
        "#,
    )
    .bind(&student.full_name)
    .bind(&student.email)
    .bind(&student.student_id)
    .bind(&student.course)
    .bind(&student.phone)
    .bind(&student.address)
    .bind(&student.date_of_birth)
    .bind(&student.enrollment_date)
    .bind(&student.status)
    .bind(&student.updated_at)
    .bind(&student.id)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn delete(db: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM students WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count_by_status(db: &SqlitePool, status: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM students WHERE status = ?1")
        .bind(status)
        .fetch_one(db)
        .await
}

pub async fn count_created_since(db: &SqlitePool, since: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM students WHERE created_at >= ?1")
        .bind(since)
        .fetch_one(db)
        .await
}

/// Registrations per calendar day (`YYYY-MM-DD`) from `since` onwards.
pub async fn registrations_per_day(
    db: &SqlitePool,
    since: &str,
) -> Result<Vec<(String, i64)>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT substr(created_at, 1, 10) AS day, COUNT(*)
        FROM students
        WHERE created_at >= ?1
        GROUP BY day
        ORDER BY day
        "#,
    )
    .bind(since)
    .fetch_all(db)
    .await
}
