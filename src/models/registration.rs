use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::error::AppError;

pub const DEFAULT_LINK_TITLE: &str = "Student Registration Form";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RegistrationLink {
    pub link: String,
    pub title: String,
    pub updated_by: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegistrationLinkRequest {
    #[validate(url(message = "link must be a valid URL"))]
    pub link: String,
    pub title: Option<String>,
}

impl RegistrationLinkRequest {
    pub fn normalized(self) -> Result<Self, AppError> {
        let req = Self {
            link: self.link.trim().to_string(),
            title: Some(super::non_blank(self.title).unwrap_or_else(|| DEFAULT_LINK_TITLE.to_string())),
        };
        if req.link.is_empty() {
            return Err(AppError::BadRequest("link is required".to_string()));
        }
        req.validate()?;
        Ok(req)
    }
}
