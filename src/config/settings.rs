use std::env;
use std::path::PathBuf;

use argon2::{Argon2, PasswordHash, PasswordVerifier};

use crate::types::internal::auth::Role;

/// Static credentials for one role.
///
/// The password may be stored as an argon2 hash (recommended) or plain;
/// `verify` handles both so deployments can migrate gradually.
#[derive(Debug, Clone)]
pub struct RoleCredentials {
    pub username: String,
    password: String,
}

impl RoleCredentials {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }

    pub fn verify(&self, username: &str, password: &str) -> bool {
        if self.username != username {
            return false;
        }
        if self.password.starts_with("$argon2") {
            match PasswordHash::new(&self.password) {
                Ok(parsed) => Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok(),
                Err(_) => false,
            }
        } else {
            self.password == password
        }
    }
}

/// Application settings loaded from the environment
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database_url: String,
    pub jwt_secret: String,
    pub session_expiry_secs: i64,

    pub hr_credentials: RoleCredentials,
    pub medical_credentials: RoleCredentials,
    pub safety_credentials: RoleCredentials,
    pub admin_credentials: RoleCredentials,

    pub idcard_validity_days: i64,

    pub upload_root: PathBuf,
    pub max_upload_bytes: usize,

    pub company_name: String,
    pub company_address: String,
    pub company_logo: PathBuf,
}

impl AppSettings {
    /// Load settings from environment variables, applying defaults where
    /// a value is optional.
    ///
    /// `JWT_SECRET` has no default and must be set.
    pub fn from_env() -> Result<Self, SettingsError> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://gatepass.db?mode=rwc".to_string());

        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| SettingsError::Missing("JWT_SECRET"))?;

        let session_expiry_secs = env_parse("SESSION_EXPIRY_SECS", 8 * 60 * 60)?;
        let idcard_validity_days = env_parse("IDCARD_VALIDITY_DAYS", 365)?;
        let max_upload_bytes = env_parse("MAX_CONTENT_LENGTH", 16 * 1024 * 1024)?;

        Ok(Self {
            database_url,
            jwt_secret,
            session_expiry_secs,
            hr_credentials: role_credentials("HR", "hr_admin"),
            medical_credentials: role_credentials("MEDICAL", "medical_admin"),
            safety_credentials: role_credentials("SAFETY", "safety_admin"),
            admin_credentials: role_credentials("ADMIN", "admin"),
            idcard_validity_days,
            upload_root: PathBuf::from(
                env::var("UPLOAD_FOLDER").unwrap_or_else(|_| "uploads".to_string()),
            ),
            max_upload_bytes,
            company_name: env::var("COMPANY_NAME")
                .unwrap_or_else(|_| "ANSA Deco Glass".to_string()),
            company_address: env::var("COMPANY_ADDRESS")
                .unwrap_or_else(|_| "Manufacturing Unit, Industrial Area".to_string()),
            company_logo: PathBuf::from(
                env::var("COMPANY_LOGO")
                    .unwrap_or_else(|_| "static/images/company_logo.png".to_string()),
            ),
        })
    }

    /// Credentials for the given role
    pub fn credentials_for(&self, role: Role) -> &RoleCredentials {
        match role {
            Role::Hr => &self.hr_credentials,
            Role::Medical => &self.medical_credentials,
            Role::Safety => &self.safety_credentials,
            Role::Admin => &self.admin_credentials,
        }
    }
}

fn role_credentials(prefix: &str, default_username: &str) -> RoleCredentials {
    let username =
        env::var(format!("{}_USERNAME", prefix)).unwrap_or_else(|_| default_username.to_string());
    let password = env::var(format!("{}_PASSWORD", prefix)).unwrap_or_default();
    RoleCredentials::new(username, password)
}

fn env_parse<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, SettingsError> {
    match env::var(key) {
        Ok(value) => value.parse().map_err(|_| SettingsError::Invalid(key)),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_password_verifies_by_equality() {
        let creds = RoleCredentials::new("hr_admin".to_string(), "hr@123".to_string());
        assert!(creds.verify("hr_admin", "hr@123"));
        assert!(!creds.verify("hr_admin", "wrong"));
        assert!(!creds.verify("other", "hr@123"));
    }

    #[test]
    fn hashed_password_verifies_via_argon2() {
        use argon2::password_hash::{rand_core::OsRng, SaltString};
        use argon2::PasswordHasher;

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(b"secret", &salt)
            .unwrap()
            .to_string();

        let creds = RoleCredentials::new("admin".to_string(), hash);
        assert!(creds.verify("admin", "secret"));
        assert!(!creds.verify("admin", "not-secret"));
    }
}
