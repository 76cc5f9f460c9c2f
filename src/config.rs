use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::auth::jwt::JwtConfig;

const DEFAULT_JWT_SECRET: &str = "edunova-dev-secret-change-me";
const DEFAULT_SECURITY_KEY: &str = "ADMIN2025SECURE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Server configuration, read from the environment (a `.env` file is
/// loaded first by `main`).
///
/// | Env Var                  | Default                                   |
/// |--------------------------|-------------------------------------------|
/// | `HOST`                   | `127.0.0.1`                               |
/// | `PORT`                   | `5000`                                    |
/// | `DATABASE_URL`           | `sqlite://edunova.db`                     |
/// | `JWT_SECRET`             | development secret (logged as a warning)  |
/// | `JWT_EXPIRY_HOURS`       | `24`                                      |
/// | `ADMIN_SECURITY_KEY`     | `ADMIN2025SECURE`                         |
/// | `CORS_ORIGINS`           | localhost:3000, 127.0.0.1:3000, :5000     |
/// | `STATIC_ROOT`            | `.`                                       |
/// | `DEFAULT_ADMIN_PASSWORD` | `admin123`                                |
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt: JwtConfig,
    pub admin_security_key: String,
    pub cors_origins: Vec<String>,
    pub static_root: PathBuf,
    pub default_admin_password: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parse_var("PORT", "5000", "u16")?;
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://edunova.db".to_string());

        let secret = match env::var("JWT_SECRET") {
            Ok(s) if !s.is_empty() => s,
            _ => {
                tracing::warn!("JWT_SECRET is not set, falling back to the development secret");
                DEFAULT_JWT_SECRET.to_string()
            }
        };
        let expiry_hours = parse_var("JWT_EXPIRY_HOURS", "24", "i64")?;

        let admin_security_key = env::var("ADMIN_SECURITY_KEY")
            .unwrap_or_else(|_| DEFAULT_SECURITY_KEY.to_string());

        let cors_origins = split_origins(&env::var("CORS_ORIGINS").unwrap_or_else(|_| {
            "http://localhost:3000,http://127.0.0.1:3000,http://localhost:5000".to_string()
        }));

        let static_root = PathBuf::from(env::var("STATIC_ROOT").unwrap_or_else(|_| ".".to_string()));
        let default_admin_password =
            env::var("DEFAULT_ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());

        Ok(Self {
            host,
            port,
            database_url,
            jwt: JwtConfig {
                secret,
                expiry_hours,
            },
            admin_security_key,
            cors_origins,
            static_root,
            default_admin_password,
        })
    }

    /// Configuration for tests and tooling: in-memory database, fixed secrets.
    pub fn for_tests() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            database_url: "sqlite::memory:".to_string(),
            jwt: JwtConfig {
                secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
                expiry_hours: 24,
            },
            admin_security_key: DEFAULT_SECURITY_KEY.to_string(),
            cors_origins: vec!["http://localhost:3000".to_string()],
            static_root: PathBuf::from("."),
            default_admin_password: "admin123".to_string(),
        }
    }

    /// Appends origins not already allowed, trimming blanks.
    pub fn merge_origins(&mut self, extra: impl IntoIterator<Item = String>) {
        for origin in extra {
            let origin = origin.trim();
            if !origin.is_empty() && !self.cors_origins.iter().any(|o| o == origin) {
                self.cors_origins.push(origin.to_string());
            }
        }
    }
}

fn parse_var<T: std::str::FromStr>(
    name: &'static str,
    default: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    let value = env::var(name).unwrap_or_else(|_| default.to_string());
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        expected,
        value,
    })
}

pub fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
