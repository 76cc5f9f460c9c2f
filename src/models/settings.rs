use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;

pub const DEFAULT_SITE_NAME: &str = "EduNova";

/// Site-wide settings edited from the back-office.
///
/// `cors_origins` are merged into the server's CORS allow-list when it
/// starts; edits take effect on the next restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub site_name: String,
    pub logo_url: String,
    pub cors_origins: Vec<String>,
    pub enable_registrations: bool,
    pub updated_at: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            site_name: DEFAULT_SITE_NAME.to_string(),
            logo_url: String::new(),
            cors_origins: Vec::new(),
            enable_registrations: true,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateSettingsRequest {
    pub site_name: String,
    #[validate(url(message = "logo_url must be a valid URL"))]
    pub logo_url: Option<String>,
    pub cors_origins: Vec<String>,
    pub enable_registrations: Option<bool>,
}

impl UpdateSettingsRequest {
    pub fn normalized(self) -> Result<Self, AppError> {
        let req = Self {
            site_name: self.site_name.trim().to_string(),
            logo_url: super::non_blank(self.logo_url),
            cors_origins: self
                .cors_origins
                .into_iter()
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            enable_registrations: self.enable_registrations,
        };
        if req.site_name.is_empty() {
            return Err(AppError::BadRequest("site_name is required".to_string()));
        }
        req.validate()?;
        Ok(req)
    }
}
