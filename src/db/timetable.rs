use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use uuid::Uuid;

use super::now;
use crate::models::{TimetableEntry, TimetableFilter, TimetableSlot, TimetableStats};

const SELECT: &str = "SELECT id, date, start_time, end_time, subject, grade, created_at, \
                      updated_at FROM timetable_entries";

pub async fn list(
    db: &SqlitePool,
    filter: &TimetableFilter,
) -> Result<Vec<TimetableEntry>, sqlx::Error> {
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT);
    qb.push(" WHERE 1 = 1");
    if let Some(grade) = filter.grade.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        qb.push(" AND grade = ").push_bind(grade.to_string());
    }
    if let Some(subject) = filter.subject.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        qb.push(" AND subject = ").push_bind(subject.to_lowercase());
    }
    if let Some(date) = filter.date.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        qb.push(" AND date = ").push_bind(date.to_string());
    }
    qb.push(" ORDER BY date ASC, start_time ASC");

    let rows = qb.build_query_as::<TimetableEntry>().fetch_all(db).await?;
    Ok(rows.into_iter().map(TimetableEntry::with_day).collect())
}

pub async fn find(db: &SqlitePool, id: &str) -> Result<Option<TimetableEntry>, sqlx::Error> {
    let row = sqlx::query_as::<_, TimetableEntry>(&format!("{SELECT} WHERE id = ?1"))
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row.map(TimetableEntry::with_day))
}

async fn insert_with(
    conn: &mut SqliteConnection,
    slot: TimetableSlot,
    now: &str,
) -> Result<TimetableEntry, sqlx::Error> {
    let id = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO timetable_entries
            (id, date, start_time, end_time, subject, grade, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
        "#,
    )
    .bind(&id)
    .bind(&slot.date)
    .bind(&slot.start_time)
    .bind(&slot.end_time)
    .bind(&slot.subject)
    .bind(&slot.grade)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    Ok(TimetableEntry {
        id,
        date: slot.date,
        start_time: slot.start_time,
        end_time: slot.end_time,
        subject: slot.subject,
        grade: slot.grade,
        day: String::new(),
        created_at: now.to_string(),
        updated_at: now.to_string(),
    }
    .with_day())
}

pub async fn insert(db: &SqlitePool, slot: TimetableSlot) -> Result<TimetableEntry, sqlx::Error> {
    let mut conn = db.acquire().await?;
    insert_with(&mut *conn, slot, &now()).await
}

/// Rewrites one entry in place. `None` when no such entry exists.
pub async fn update(
    db: &SqlitePool,
    id: &str,
    slot: TimetableSlot,
) -> Result<Option<TimetableEntry>, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE timetable_entries
        SET date = ?1, start_time = ?2, end_time = ?3, subject = ?4, grade = ?5, updated_at = ?6
        WHERE id = ?7
        "#,
    )
    .bind(&slot.date)
    .bind(&slot.start_time)
    .bind(&slot.end_time)
    .bind(&slot.subject)
    .bind(&slot.grade)
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
    let result = sqlx::query("DELETE FROM timetable_entries WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Swaps the whole timetable for `slots` in one transaction; on any error
/// the previous timetable is left untouched.
pub async fn replace_all(
    db: &SqlitePool,
    slots: Vec<TimetableSlot>,
) -> Result<Vec<TimetableEntry>, sqlx::Error> {
    let mut tx = db.begin().await?;
    let now = now();

    sqlx::query("DELETE FROM timetable_entries")
        .execute(&mut *tx)
        .await?;

    let mut entries = Vec::with_capacity(slots.len());
    for slot in slots {
        entries.push(insert_with(&mut *tx, slot, &now).await?);
    }

    tx.commit().await?;
    entries.sort_by(|a, b| (&a.date, &a.start_time).cmp(&(&b.date, &b.start_time)));
    Ok(entries)
}

pub async fn stats(db: &SqlitePool) -> Result<TimetableStats, sqlx::Error> {
    let (total_classes, subjects, grades, days_scheduled): (i64, i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT COUNT(*), COUNT(DISTINCT subject), COUNT(DISTINCT grade), COUNT(DISTINCT date)
        FROM timetable_entries
        "#,
    )
    .fetch_one(db)
    .await?;

    Ok(TimetableStats {
        total_classes,
        subjects,
        grades,
        days_scheduled,
    })
}
