use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::non_blank;
use crate::error::AppError;

pub const FEEDBACK_TYPES: &[&str] = &["general", "course", "teacher", "facility", "suggestion"];
pub const FEEDBACK_STATUSES: &[&str] = &["pending", "reviewed", "resolved"];

pub const ANONYMOUS_NAME: &str = "Anonymous";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Feedback {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub message: String,
    pub rating: Option<i64>,
    pub feedback_type: String,
    pub student_id: Option<String>,
    pub is_anonymous: bool,
    pub status: String,
    pub admin_response: Option<String>,
    pub responded_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Feedback {
    /// Form shown on the public site: anonymous authors stay anonymous and
    /// contact details never leave the back-office.
    pub fn public_view(mut self) -> Self {
        if self.is_anonymous {
            self.name = ANONYMOUS_NAME.to_string();
        }
        self.email = None;
        self.student_id = None;
        self
    }
}

/// Accepts the current dashboard body as well as the older `{name, comment}`
/// and camelCase variants still posted by some pages.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct NewFeedbackRequest {
    pub name: Option<String>,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    #[serde(alias = "comment")]
    pub message: Option<String>,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: Option<i64>,
    #[serde(alias = "feedbackType")]
    pub feedback_type: Option<String>,
    #[serde(alias = "studentId")]
    pub student_id: Option<String>,
    #[serde(alias = "isAnonymous")]
    pub is_anonymous: bool,
}

/// A validated submission, ready to insert.
#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub name: String,
    pub email: Option<String>,
    pub message: String,
    pub rating: Option<i64>,
    pub feedback_type: String,
    pub student_id: Option<String>,
    pub is_anonymous: bool,
}

impl NewFeedbackRequest {
    pub fn into_new_feedback(self) -> Result<NewFeedback, AppError> {
        let req = Self {
            name: non_blank(self.name),
            email: non_blank(self.email),
            message: non_blank(self.message),
            feedback_type: non_blank(self.feedback_type).map(|t| t.to_lowercase()),
            student_id: non_blank(self.student_id),
            ..self
        };
        req.validate()?;

        let message = req
            .message
            .ok_or_else(|| AppError::BadRequest("message is required".to_string()))?;

        let name = match (req.name, req.is_anonymous) {
            (Some(name), _) => name,
            (None, true) => ANONYMOUS_NAME.to_string(),
            (None, false) => return Err(AppError::BadRequest("name is required".to_string())),
        };

        let feedback_type = req.feedback_type.unwrap_or_else(|| "general".to_string());
        if !FEEDBACK_TYPES.contains(&feedback_type.as_str()) {
            return Err(AppError::BadRequest(format!(
                "feedback_type must be one of: {}",
                FEEDBACK_TYPES.join(", ")
            )));
        }

        Ok(NewFeedback {
            name,
            email: req.email,
            message,
            rating: req.rating,
            feedback_type,
            student_id: req.student_id,
            is_anonymous: req.is_anonymous,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFeedbackRequest {
    pub status: Option<String>,
    pub admin_response: Option<String>,
}

impl UpdateFeedbackRequest {
    pub fn normalized(self) -> Result<Self, AppError> {
        let status = non_blank(self.status).map(|s| s.to_lowercase());
        if let Some(status) = &status {
            if !FEEDBACK_STATUSES.contains(&status.as_str()) {
                return Err(AppError::BadRequest(format!(
                    "status must be one of: {}",
                    FEEDBACK_STATUSES.join(", ")
                )));
            }
        }
        let admin_response = non_blank(self.admin_response);
        if status.is_none() && admin_response.is_none() {
            return Err(AppError::BadRequest(
                "status or admin_response is required".to_string(),
            ));
        }
        Ok(Self {
            status,
            admin_response,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackFilter {
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub feedback_type: Option<String>,
    pub min_rating: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FeedbackStats {
    pub total: i64,
    pub pending: i64,
    pub reviewed: i64,
    pub resolved: i64,
    pub average_rating: Option<f64>,
    pub by_type: BTreeMap<String, i64>,
}
