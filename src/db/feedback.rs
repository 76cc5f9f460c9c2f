use std::collections::BTreeMap;

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use super::now;
use crate::models::{Feedback, FeedbackFilter, FeedbackStats, NewFeedback, Page, UpdateFeedbackRequest};

const SELECT: &str = "SELECT id, name, email, message, rating, feedback_type, student_id, \
                      is_anonymous, status, admin_response, responded_at, created_at, \
                      updated_at FROM feedback";

pub async fn insert(db: &SqlitePool, fb: NewFeedback) -> Result<Feedback, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = now();
    let status = "pending".to_string();

    sqlx::query(
        r#"
        INSERT INTO feedback
            (id, name, email, message, rating, feedback_type, student_id, is_anonymous,
             status, admin_response, responded_at, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, NULL, NULL, ?10, ?10)
        "#,
    )
    .bind(&id)
    .bind(&fb.name)
    .bind(&fb.email)
    .bind(&fb.message)
    .bind(fb.rating)
    .bind(&fb.feedback_type)
    .bind(&fb.student_id)
    .bind(fb.is_anonymous)
    .bind(&status)
    .bind(&now)
    .execute(db)
    .await?;

    Ok(Feedback {
        id,
        name: fb.name,
        email: fb.email,
        message: fb.message,
        rating: fb.rating,
        feedback_type: fb.feedback_type,
        student_id: fb.student_id,
        is_anonymous: fb.is_anonymous,
        status,
        admin_response: None,
        responded_at: None,
        created_at: now.clone(),
        updated_at: now,
    })
}

/// Newest first, optionally restricted to a minimum rating.
pub async fn recent(
    db: &SqlitePool,
    min_rating: Option<i64>,
    limit: i64,
) -> Result<Vec<Feedback>, sqlx::Error> {
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT);
    if let Some(min) = min_rating {
        qb.push(" WHERE rating >= ").push_bind(min);
    }
    qb.push(" ORDER BY created_at DESC, rowid DESC LIMIT ")
        .push_bind(limit);
    qb.build_query_as::<Feedback>().fetch_all(db).await
}

fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &FeedbackFilter) {
    qb.push(" WHERE 1 = 1");
    if let Some(status) = filter.status.as_deref().filter(|s| !s.is_empty()) {
        qb.push(" AND status = ").push_bind(status.to_lowercase());
    }
    if let Some(kind) = filter.feedback_type.as_deref().filter(|s| !s.is_empty()) {
        qb.push(" AND feedback_type = ").push_bind(kind.to_lowercase());
    }
    if let Some(min) = filter.min_rating {
        qb.push(" AND rating >= ").push_bind(min);
    }
}

/// One page of the back-office listing plus the total matching count.
pub async fn list_page(
    db: &SqlitePool,
    filter: &FeedbackFilter,
    window: Page,
) -> Result<(Vec<Feedback>, i64), sqlx::Error> {
    let mut count_qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*) FROM feedback");
    push_filter(&mut count_qb, filter);
    let total: i64 = count_qb.build_query_scalar().fetch_one(db).await?;

    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT);
    push_filter(&mut qb, filter);
    qb.push(" ORDER BY created_at DESC, rowid DESC LIMIT ")
        .push_bind(window.limit)
        .push(" OFFSET ")
        .push_bind(window.offset);
    let rows = qb.build_query_as::<Feedback>().fetch_all(db).await?;

    Ok((rows, total))
}

pub async fn stats(db: &SqlitePool) -> Result<FeedbackStats, sqlx::Error> {
    let statuses: Vec<(String, i64)> =
        sqlx::query_as("SELECT status, COUNT(*) FROM feedback GROUP BY status")
            .fetch_all(db)
            .await?;
    let by_type: Vec<(String, i64)> =
        sqlx::query_as("SELECT feedback_type, COUNT(*) FROM feedback GROUP BY feedback_type")
            .fetch_all(db)
            .await?;

    let mut stats = FeedbackStats {
        average_rating: average_rating(db).await?,
        by_type: by_type.into_iter().collect::<BTreeMap<_, _>>(),
        ..Default::default()
    };
    for (status, n) in statuses {
        stats.total += n;
        match status.as_str() {
            "pending" => stats.pending = n,
            "reviewed" => stats.reviewed = n,
            "resolved" => stats.resolved = n,
            _ => {}
        }
    }
    Ok(stats)
}

/// Mean of the rated entries, rounded to one decimal.
pub async fn average_rating(db: &SqlitePool) -> Result<Option<f64>, sqlx::Error> {
    let avg: Option<f64> =
        sqlx::query_scalar("SELECT AVG(CAST(rating AS REAL)) FROM feedback WHERE rating IS NOT NULL")
            .fetch_one(db)
            .await?;
    Ok(avg.map(|a| (a * 10.0).round() / 10.0))
}

pub async fn count(db: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM feedback")
        .fetch_one(db)
        .await
}

/// Applies a moderation update in one statement. A response also stamps
/// `responded_at`. `None` when no such entry exists.
pub async fn update(
    db: &SqlitePool,
    id: &str,
    req: UpdateFeedbackRequest,
) -> Result<Option<Feedback>, sqlx::Error> {
    sqlx::query_as::<_, Feedback>(
        r#"
        UPDATE feedback
        SET status = COALESCE(?1, status),
            admin_response = COALESCE(?2, admin_response),
            responded_at = CASE WHEN ?2 IS NULL THEN responded_at ELSE ?3 END,
            updated_at = ?3
        WHERE id = ?4
        RETURNING id, name, email, message, rating, feedback_type, student_id,
                  is_anonymous, status, admin_response, responded_at, created_at, updated_at
        "#,
    )
    .bind(req.status)
    .bind(req.admin_response)
    .bind(now())
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn delete(db: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM feedback WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
