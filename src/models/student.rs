use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::non_blank;
use super::pagination::Pagination;
use crate::error::AppError;

pub const STUDENT_STATUSES: &[&str] = &["active", "pending", "inactive", "graduated"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub student_id: String,
    pub course: String,
    pub phone: String,
    pub address: String,
    pub date_of_birth: Option<String>,
    pub enrollment_date: String,
    pub status: String,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct NewStudentRequest {
    pub full_name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    pub student_id: String,
    pub course: String,
    pub phone: String,
    pub address: Option<String>,
    pub date_of_birth: Option<String>,
    pub enrollment_date: Option<String>,
    pub status: Option<String>,
}

impl NewStudentRequest {
    pub fn normalized(self) -> Result<Self, AppError> {
        let req = Self {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            student_id: self.student_id.trim().to_string(),
            course: self.course.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: non_blank(self.address),
            date_of_birth: non_blank(self.date_of_birth),
            enrollment_date: Some(
                non_blank(self.enrollment_date).unwrap_or_else(|| Utc::now().to_rfc3339()),
            ),
            status: Some(non_blank(self.status).map(|s| s.to_lowercase()).unwrap_or_else(|| "active".to_string())),
        };

        let missing: Vec<&str> = [
            ("full_name", &req.full_name),
            ("email", &req.email),
            ("student_id", &req.student_id),
            ("course", &req.course),
            ("phone", &req.phone),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.is_empty().then_some(name))
        .collect();
        if !missing.is_empty() {
            return Err(AppError::BadRequest(format!("{} is required", missing.join(", "))));
        }

        req.validate()?;
        check_status(req.status.as_deref())?;
        Ok(req)
    }
}

/// Partial update; `id`, `created_at` and `created_by` are not updatable.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateStudentRequest {
    pub full_name: Option<String>,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    pub student_id: Option<String>,
    pub course: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<String>,
    pub enrollment_date: Option<String>,
    pub status: Option<String>,
}

impl UpdateStudentRequest {
    pub fn normalized(self) -> Result<Self, AppError> {
        let req = Self {
            full_name: non_blank(self.full_name),
            email: non_blank(self.email).map(|e| e.to_lowercase()),
            student_id: non_blank(self.student_id),
            course: non_blank(self.course),
            phone: non_blank(self.phone),
            address: self.address.map(|a| a.trim().to_string()),
            date_of_birth: non_blank(self.date_of_birth),
            enrollment_date: non_blank(self.enrollment_date),
            status: non_blank(self.status).map(|s| s.to_lowercase()),
        };
        req.validate()?;
        check_status(req.status.as_deref())?;
        Ok(req)
    }

    pub fn apply(self, student: &mut Student) {
        if let Some(v) = self.full_name {
            student.full_name = v;
        }
        if let Some(v) = self.email {
            student.email = v;
        }
        if let Some(v) = self.student_id {
            student.student_id = v;
        }
        if let Some(v) = self.course {
            student.course = v;
        }
        if let Some(v) = self.phone {
            student.phone = v;
        }
        if let Some(v) = self.address {
            student.address = v;
        }
        if let Some(v) = self.date_of_birth {
            student.date_of_birth = Some(v);
        }
        if let Some(v) = self.enrollment_date {
            student.enrollment_date = v;
        }
        if let Some(v) = self.status {
            student.status = v;
        }
    }
}

fn check_status(status: Option<&str>) -> Result<(), AppError> {
    match status {
        Some(s) if !STUDENT_STATUSES.contains(&s) => Err(AppError::BadRequest(format!(
            "status must be one of: {}",
            STUDENT_STATUSES.join(", ")
        ))),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

impl StudentQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            limit: self.limit,
        }
    }
}
