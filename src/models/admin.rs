use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::non_blank;
use crate::auth::password::validate_password_strength;
use crate::error::AppError;

pub const ADMIN_ROLES: &[&str] = &["admin", "super_admin"];

#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// What the dashboard sees of an admin; never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub last_login_at: Option<String>,
}

impl From<&Admin> for AdminProfile {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id.clone(),
            username: admin.username.clone(),
            email: admin.email.clone(),
            full_name: admin.full_name.clone(),
            role: admin.role.clone(),
            last_login_at: admin.last_login_at.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterAdminRequest {
    pub username: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub security_key: Option<String>,
    pub role: Option<String>,
}

impl RegisterAdminRequest {
    /// Field checks only; the security key is compared by the handler.
    pub fn normalized(self) -> Result<Self, AppError> {
        let req = Self {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            full_name: self.full_name.trim().to_string(),
            role: non_blank(self.role).map(|r| r.to_lowercase()),
            ..self
        };

        let missing: Vec<&str> = [
            ("username", req.username.is_empty()),
            ("email", req.email.is_empty()),
            ("password", req.password.is_empty()),
            ("full_name", req.full_name.is_empty()),
        ]
        .into_iter()
        .filter_map(|(name, empty)| empty.then_some(name))
        .collect();
        if !missing.is_empty() {
            return Err(AppError::BadRequest(format!(
                "{} is required",
                missing.join(", ")
            )));
        }

        if req.username.contains('@') {
            return Err(AppError::BadRequest(
                "username must not contain '@'".to_string(),
            ));
        }
        req.validate()?;
        validate_password_strength(&req.password).map_err(AppError::BadRequest)?;

        if let Some(role) = &req.role {
            if !ADMIN_ROLES.contains(&role.as_str()) {
                return Err(AppError::BadRequest(format!(
                    "role must be one of: {}",
                    ADMIN_ROLES.join(", ")
                )));
            }
        }
        Ok(req)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
}

impl UpdateProfileRequest {
    pub fn normalized(self) -> Result<Self, AppError> {
        let req = Self {
            full_name: non_blank(self.full_name),
            email: non_blank(self.email).map(|e| e.to_lowercase()),
        };
        req.validate()?;
        Ok(req)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ChangePasswordRequest {
    pub fn check(&self) -> Result<(), AppError> {
        if self.current_password.is_empty() || self.new_password.is_empty() {
            return Err(AppError::BadRequest(
                "current_password and new_password are required".to_string(),
            ));
        }
        if self.new_password != self.confirm_password {
            return Err(AppError::BadRequest("Passwords do not match".to_string()));
        }
        validate_password_strength(&self.new_password).map_err(AppError::BadRequest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register() -> RegisterAdminRequest {
        RegisterAdminRequest {
            username: " testadmin ".into(),
            email: "Test@EduNova.com".into(),
            password: "TestPass123".into(),
            full_name: "Test Admin".into(),
            security_key: Some("key".into()),
            role: None,
        }
    }

    #[test]
    fn register_normalizes_identity_fields() {
        let req = register().normalized().unwrap();
        assert_eq!(req.username, "testadmin");
        assert_eq!(req.email, "test@edunova.com");
    }

    #[test]
    fn register_lists_missing_fields() {
        let mut req = register();
        req.username.clear();
        req.full_name.clear();
        match req.normalized() {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "username, full_name is required"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn register_rejects_unknown_role() {
        let mut req = register();
        req.role = Some("root".into());
        assert!(req.normalized().is_err());
    }

    #[test]
    fn register_rejects_email_shaped_username() {
        let mut req = register();
        req.username = "admin@edunova.local".into();
        assert!(matches!(req.normalized(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn change_password_requires_confirmation() {
        let req = ChangePasswordRequest {
            current_password: "admin123".into(),
            new_password: "newpass1".into(),
            confirm_password: "newpass2".into(),
        };
        assert!(req.check().is_err());
    }
}
