use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::errors::internal::SessionError;
use crate::types::internal::auth::{Claims, Role};

/// Issues and validates bearer tokens for role sessions.
///
/// Tokens are HS256 JWTs carrying the role name; there is no user table,
/// so the subject is the configured username for the role.
pub struct SessionService {
    jwt_secret: String,
    expiry_secs: i64,
}

impl SessionService {
    pub fn new(jwt_secret: String, expiry_secs: i64) -> Self {
        Self {
            jwt_secret,
            expiry_secs,
        }
    }

    /// Seconds a freshly issued token stays valid
    pub fn expiry_secs(&self) -> i64 {
        self.expiry_secs
    }

    /// Generate a session token for a role
    pub fn issue(&self, role: Role, username: &str) -> Result<String, SessionError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: username.to_string(),
            role: role.as_str().to_string(),
            exp: now + self.expiry_secs,
            iat: now,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| SessionError::Encode(e.to_string()))
    }

    /// Validate a bearer token and return its claims and role
    pub fn validate(&self, token: &str) -> Result<(Claims, Role), SessionError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::Expired,
            _ => SessionError::Invalid,
        })?;

        let claims = token_data.claims;
        let role = Role::parse(&claims.role).ok_or(SessionError::Invalid)?;
        Ok((claims, role))
    }

    /// Validate a token and confirm it carries one of the expected roles
    pub fn require_role(&self, token: &str, allowed: &[Role]) -> Result<Claims, SessionError> {
        let (claims, role) = self.validate(token)?;
        if !allowed.contains(&role) {
            return Err(SessionError::Invalid);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> SessionService {
        SessionService::new("test-secret-key-for-session-tokens".to_string(), 3600)
    }

    #[test]
    fn issued_token_validates_and_carries_role() {
        let svc = service();
        let token = svc.issue(Role::Medical, "medical_admin").unwrap();

        let (claims, role) = svc.validate(&token).unwrap();
        assert_eq!(role, Role::Medical);
        assert_eq!(claims.sub, "medical_admin");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let svc = service();
        let other = SessionService::new("a-completely-different-secret-key".to_string(), 3600);
        let token = other.issue(Role::Hr, "hr_admin").unwrap();

        assert!(matches!(svc.validate(&token), Err(SessionError::Invalid)));
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let svc = SessionService::new("test-secret-key-for-session-tokens".to_string(), -120);
        let token = svc.issue(Role::Admin, "admin").unwrap();

        assert!(matches!(svc.validate(&token), Err(SessionError::Expired)));
    }

    #[test]
    fn require_role_enforces_the_allowed_set() {
        let svc = service();
        let token = svc.issue(Role::Safety, "safety_admin").unwrap();

        assert!(svc.require_role(&token, &[Role::Safety]).is_ok());
        assert!(svc.require_role(&token, &[Role::Hr, Role::Admin]).is_err());
    }

    #[test]
    fn garbage_token_is_invalid() {
        let svc = service();
        assert!(matches!(
            svc.validate("not-a-jwt"),
            Err(SessionError::Invalid)
        ));
    }
}
