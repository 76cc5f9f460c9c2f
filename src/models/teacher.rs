use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::non_blank;
use crate::error::AppError;

pub const TEACHER_STATUSES: &[&str] = &["active", "inactive"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Teacher {
    pub id: String,
    pub name: String,
    pub subject: String,
    pub contact: String,
    pub email: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct NewTeacherRequest {
    pub name: String,
    pub subject: String,
    pub contact: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
}

impl NewTeacherRequest {
    pub fn normalized(self) -> Result<Self, AppError> {
        let req = Self {
            name: self.name.trim().to_string(),
            subject: self.subject.trim().to_lowercase(),
            contact: self.contact.trim().to_string(),
            email: self.email.trim().to_lowercase(),
        };
        if [&req.name, &req.subject, &req.contact, &req.email]
            .iter()
            .any(|f| f.is_empty())
        {
            return Err(AppError::BadRequest(
                "name, subject, contact and email are required".to_string(),
            ));
        }
        req.validate()?;
        Ok(req)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateTeacherRequest {
    pub name: Option<String>,
    pub subject: Option<String>,
    pub contact: Option<String>,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    pub status: Option<String>,
}

impl UpdateTeacherRequest {
    pub fn normalized(self) -> Result<Self, AppError> {
        let req = Self {
            name: non_blank(self.name),
            subject: non_blank(self.subject).map(|s| s.to_lowercase()),
            contact: non_blank(self.contact),
            email: non_blank(self.email).map(|e| e.to_lowercase()),
            status: non_blank(self.status).map(|s| s.to_lowercase()),
        };
        req.validate()?;
        if let Some(status) = &req.status {
            if !TEACHER_STATUSES.contains(&status.as_str()) {
                return Err(AppError::BadRequest(format!(
                    "status must be one of: {}",
                    TEACHER_STATUSES.join(", ")
                )));
            }
        }
        Ok(req)
    }

    pub fn apply(self, teacher: &mut Teacher) {
        if let Some(v) = self.name {
            teacher.name = v;
        }
        if let Some(v) = self.subject {
            teacher.subject = v;
        }
        if let Some(v) = self.contact {
            teacher.contact = v;
        }
        if let Some(v) = self.email {
            teacher.email = v;
        }
        if let Some(v) = self.status {
            teacher.status = v;
        }
    }
}
