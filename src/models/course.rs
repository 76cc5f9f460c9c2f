use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CourseMaterial {
    pub id: String,
    pub grade: String,
    pub subject: String,
    pub resource_type: String,
    pub year: String,
    pub link: String,
    pub uploaded_by: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Body of both `POST /api/courses` and `PUT /api/courses/{id}`; an update
/// replaces all five fields.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CourseMaterialRequest {
    pub grade: String,
    pub subject: String,
    #[serde(alias = "resource_type")]
    pub resource_type: String,
    pub year: String,
    #[validate(url(message = "link must be a valid URL"))]
    pub link: String,
}

impl CourseMaterialRequest {
    pub fn normalized(self) -> Result<Self, AppError> {
        let req = Self {
            grade: self.grade.trim().to_string(),
            subject: self.subject.trim().to_string(),
            resource_type: self.resource_type.trim().to_string(),
            year: self.year.trim().to_string(),
            link: self.link.trim().to_string(),
        };

        let fields = [&req.grade, &req.subject, &req.resource_type, &req.year, &req.link];
        if fields.iter().any(|f| f.is_empty()) {
            return Err(AppError::BadRequest("All fields are required".to_string()));
        }

        req.validate()?;
        Ok(req)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseFilter {
    pub grade: Option<String>,
    pub subject: Option<String>,
    #[serde(alias = "resource_type")]
    pub resource_type: Option<String>,
    pub year: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CourseMaterialRequest {
        CourseMaterialRequest {
            grade: " Grade 6 ".into(),
            subject: "Mathematics".into(),
            resource_type: "Past Paper".into(),
            year: "2023".into(),
            link: "https://example.com/paper.pdf".into(),
        }
    }

    #[test]
    fn normalized_trims_fields() {
        let req = request().normalized().unwrap();
        assert_eq!(req.grade, "Grade 6");
    }

    #[test]
    fn blank_field_is_rejected() {
        let mut req = request();
        req.year = "   ".into();
        match req.normalized() {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "All fields are required"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn link_must_be_a_url() {
        let mut req = request();
        req.link = "not a link".into();
        assert!(matches!(req.normalized(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn accepts_camel_case_body() {
        let req: CourseMaterialRequest = serde_json::from_value(serde_json::json!({
            "grade": "Grade 7",
            "subject": "Science",
            "resourceType": "Notes",
            "year": "2024",
            "link": "https://example.com"
        }))
        .unwrap();
        assert_eq!(req.resource_type, "Notes");
    }
}
