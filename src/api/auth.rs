use std::sync::Arc;

use poem_openapi::{auth::Bearer, payload::Json, OpenApi, SecurityScheme, Tags};

use crate::config::AppSettings;
use crate::errors::AuthError;
use crate::services::SessionService;
use crate::types::dto::auth::{LoginRequest, LoginResponse, WhoAmIResponse};
use crate::types::internal::auth::Role;

/// Authentication API endpoints
pub struct AuthApi {
    settings: Arc<AppSettings>,
    sessions: Arc<SessionService>,
}

impl AuthApi {
    pub fn new(settings: Arc<AppSettings>, sessions: Arc<SessionService>) -> Self {
        Self { settings, sessions }
    }
}

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Login as one of the configured roles to receive a session token
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<Json<LoginResponse>, AuthError> {
        let role = Role::parse(&body.role).ok_or_else(|| AuthError::unknown_role(&body.role))?;

        let credentials = self.settings.credentials_for(role);
        if !credentials.verify(&body.username, &body.password) {
            tracing::warn!(role = %role, "Failed login attempt");
            return Err(AuthError::invalid_credentials());
        }

        let access_token = self.sessions.issue(role, &body.username)?;
        tracing::info!(role = %role, "Role session issued");

        Ok(Json(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.sessions.expiry_secs(),
            role: role.as_str().to_string(),
        }))
    }

    /// Describe the session behind a bearer token
    #[oai(path = "/whoami", method = "get", tag = "AuthTags::Authentication")]
    async fn whoami(&self, auth: BearerAuth) -> Result<Json<WhoAmIResponse>, AuthError> {
        let (claims, role) = self.sessions.validate(&auth.0.token)?;

        Ok(Json(WhoAmIResponse {
            role: role.as_str().to_string(),
            username: claims.sub,
            expires_at: claims.exp,
        }))
    }
}
