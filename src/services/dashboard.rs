use chrono::{Duration, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::{admins, courses, feedback, students, teachers};
use crate::models::{Feedback, Student};

const CHART_DAYS: i64 = 7;
const RECENT_ITEMS: i64 = 5;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_students: i64,
    pub total_courses: i64,
    pub total_teachers: i64,
    pub total_admins: i64,
    pub total_feedbacks: i64,
    pub pending_registrations: i64,
    pub recent_registrations: i64,
    pub avg_rating: Option<f64>,
    pub last_login: Option<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ChartPoint {
    pub date: String,
    pub registrations: i64,
}

#[derive(Debug, Serialize)]
pub struct Activity {
    pub chart_data: Vec<ChartPoint>,
    pub recent_students: Vec<Student>,
    pub recent_feedback: Vec<Feedback>,
}

pub async fn stats(db: &SqlitePool) -> Result<DashboardStats, sqlx::Error> {
    let week_ago = (Utc::now() - Duration::days(CHART_DAYS)).to_rfc3339();

    Ok(DashboardStats {
        total_students: students::count_by_status(db, "active").await?,
        total_courses: courses::count(db).await?,
        total_teachers: teachers::count(db).await?,
        total_admins: admins::count(db).await?,
        total_feedbacks: feedback::count(db).await?,
        pending_registrations: students::count_by_status(db, "pending").await?,
        recent_registrations: students::count_created_since(db, &week_ago).await?,
        avg_rating: feedback::average_rating(db).await?,
        last_login: admins::last_login(db).await?,
    })
}

pub async fn activity(db: &SqlitePool) -> Result<Activity, sqlx::Error> {
    let days = last_days(CHART_DAYS);
    let since = days.first().cloned().unwrap_or_default();
    let counts = students::registrations_per_day(db, &since).await?;

    Ok(Activity {
        chart_data: fill_chart(&days, &counts),
        recent_students: students::recent(db, RECENT_ITEMS).await?,
        recent_feedback: feedback::recent(db, None, RECENT_ITEMS).await?,
    })
}

/// The last `n` calendar days, oldest first, as `YYYY-MM-DD`.
fn last_days(n: i64) -> Vec<String> {
    let today = Utc::now().date_naive();
    (0..n)
        .rev()
        .map(|i| (today - Duration::days(i)).format("%Y-%m-%d").to_string())
        .collect()
}

/// One point per day; days without registrations read zero.
fn fill_chart(days: &[String], counts: &[(String, i64)]) -> Vec<ChartPoint> {
    days.iter()
        .map(|day| ChartPoint {
            date: day.clone(),
            registrations: counts
                .iter()
                .find(|(d, _)| d == day)
                .map(|(_, n)| *n)
                .unwrap_or(0),
        })
        .collect()
}

/// Maps a dashboard shortcut to its back-office page.
pub fn quick_action(action: &str) -> Option<(&'static str, &'static str)> {
    let target = match action {
        "manage_courses" => ("Opening course management", "Mcources.html"),
        "manage_students" => ("Opening student management", "mstudent.html"),
        "manage_teachers" => ("Opening teacher management", "mteachers.html"),
        "manage_timetable" => ("Opening timetable management", "mtime.html"),
        "view_feedback" => ("Opening feedback", "mfeedback.html"),
        "settings" => ("Opening settings", "settings.html"),
        _ => return None,
    };
    Some(target)
}
