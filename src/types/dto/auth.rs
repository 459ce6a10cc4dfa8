use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Request model for role login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Role to authenticate as ("hr", "medical", "safety", "admin")
    pub role: String,

    /// Username for the role
    pub username: String,

    /// Password for the role
    pub password: String,
}

/// Response model describing the current session
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    /// The authenticated role
    pub role: String,

    /// Username the session was issued for
    pub username: String,

    /// Unix timestamp the session expires at
    pub expires_at: i64,
}

/// Response model containing the session token
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed bearer token carrying the role
    pub access_token: String,

    /// Token type (always "Bearer")
    pub token_type: String,

    /// Number of seconds until the token expires
    pub expires_in: i64,

    /// The authenticated role
    pub role: String,
}
