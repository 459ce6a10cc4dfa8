use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

use crate::errors::internal::SessionError;
use crate::types::dto::common::ErrorResponse;

/// Authentication error types for the role login surface
#[derive(ApiResponse, Debug)]
pub enum AuthError {
    /// Invalid username or password for the requested role
    #[oai(status = 401)]
    InvalidCredentials(Json<ErrorResponse>),

    /// Unknown role name
    #[oai(status = 400)]
    UnknownRole(Json<ErrorResponse>),

    /// Invalid or malformed bearer token
    #[oai(status = 401)]
    InvalidToken(Json<ErrorResponse>),

    /// Bearer token has expired
    #[oai(status = 401)]
    ExpiredToken(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl AuthError {
    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials(Json(ErrorResponse {
            error: "invalid_credentials".to_string(),
            message: "Invalid username or password".to_string(),
            status_code: 401,
        }))
    }

    pub fn unknown_role(role: &str) -> Self {
        AuthError::UnknownRole(Json(ErrorResponse {
            error: "unknown_role".to_string(),
            message: format!("Unknown role: {}", role),
            status_code: 400,
        }))
    }

    pub fn invalid_token() -> Self {
        AuthError::InvalidToken(Json(ErrorResponse {
            error: "invalid_token".to_string(),
            message: "Invalid or malformed bearer token".to_string(),
            status_code: 401,
        }))
    }

    pub fn expired_token() -> Self {
        AuthError::ExpiredToken(Json(ErrorResponse {
            error: "expired_token".to_string(),
            message: "Bearer token has expired".to_string(),
            status_code: 401,
        }))
    }

    pub fn internal_error(message: String) -> Self {
        AuthError::InternalError(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message,
            status_code: 500,
        }))
    }

    pub fn message(&self) -> String {
        match self {
            AuthError::InvalidCredentials(json) => json.0.message.clone(),
            AuthError::UnknownRole(json) => json.0.message.clone(),
            AuthError::InvalidToken(json) => json.0.message.clone(),
            AuthError::ExpiredToken(json) => json.0.message.clone(),
            AuthError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl From<SessionError> for AuthError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Expired => AuthError::expired_token(),
            SessionError::Invalid => AuthError::invalid_token(),
            SessionError::Encode(message) => {
                tracing::error!("Session token encoding failed: {}", message);
                AuthError::internal_error("Failed to issue session token".to_string())
            }
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
