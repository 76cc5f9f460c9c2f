use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TimetableEntry {
    pub id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub subject: String,
    pub grade: String,
    /// Weekday name derived from `date`; never stored.
    #[sqlx(skip)]
    #[serde(default)]
    pub day: String,
    pub created_at: String,
    pub updated_at: String,
}

impl TimetableEntry {
    pub fn with_day(mut self) -> Self {
        self.day = weekday_name(&self.date).unwrap_or_default();
        self
    }
}

/// Incoming entry. Both the snake_case names used by the timetable manager
/// and the camelCase `startTime`/`endTime` of older pages are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TimetableEntryRequest {
    pub date: String,
    #[serde(alias = "startTime")]
    pub start_time: String,
    #[serde(alias = "endTime")]
    pub end_time: String,
    pub subject: String,
    pub grade: String,
}

/// A checked entry with canonical formatting: zero-padded `HH:MM` times and
/// a lower-case subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableSlot {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub subject: String,
    pub grade: String,
}

impl TimetableEntryRequest {
    pub fn into_slot(self) -> Result<TimetableSlot, AppError> {
        let date = self.date.trim();
        let start = self.start_time.trim();
        let end = self.end_time.trim();
        let subject = self.subject.trim().to_lowercase();
        let grade = self.grade.trim();

        if [date, start, end, subject.as_str(), grade].iter().any(|f| f.is_empty()) {
            return Err(AppError::BadRequest(
                "All fields are required: date, start_time, end_time, subject, grade".to_string(),
            ));
        }

        let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| AppError::BadRequest("date must be in YYYY-MM-DD format".to_string()))?;
        let start = parse_time(start, "start_time")?;
        let end = parse_time(end, "end_time")?;
        if end <= start {
            return Err(AppError::BadRequest(
                "end_time must be after start_time".to_string(),
            ));
        }

        Ok(TimetableSlot {
            date: date.format(DATE_FORMAT).to_string(),
            start_time: start.format(TIME_FORMAT).to_string(),
            end_time: end.format(TIME_FORMAT).to_string(),
            subject,
            grade: grade.to_string(),
        })
    }
}

fn parse_time(value: &str, field: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .map_err(|_| AppError::BadRequest(format!("{field} must be in HH:MM format")))
}

pub fn weekday_name(date: &str) -> Option<String> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .ok()
        .map(|d| d.format("%A").to_string())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimetableFilter {
    pub grade: Option<String>,
    pub subject: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TimetableStats {
    pub total_classes: i64,
    pub subjects: i64,
    pub grades: i64,
    pub days_scheduled: i64,
}
