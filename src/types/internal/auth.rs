use serde::{Deserialize, Serialize};
use std::fmt;

use super::workflow::ReviewStage;

/// The four authenticated actors of the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Hr,
    Medical,
    Safety,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Hr => "hr",
            Role::Medical => "medical",
            Role::Safety => "safety",
            Role::Admin => "admin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "hr" => Some(Role::Hr),
            "medical" => Some(Role::Medical),
            "safety" => Some(Role::Safety),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// The review stage this role is allowed to transition, if any
    pub fn review_stage(&self) -> Option<ReviewStage> {
        match self {
            Role::Hr => Some(ReviewStage::Hr),
            Role::Medical => Some(ReviewStage::Medical),
            Role::Safety => Some(ReviewStage::Safety),
            Role::Admin => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// JWT claims for a role session
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (the configured username for the role)
    pub sub: String,

    /// Role name ("hr", "medical", "safety", "admin")
    pub role: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}
