use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

use crate::errors::internal::{InternalError, RenderError, SessionError, StorageError, WorkflowError};
use crate::types::dto::common::ErrorResponse;

/// Error responses shared by the review, registration, status, and card
/// surfaces.
///
/// Maps the internal taxonomy onto HTTP: NotFound -> 404, Conflict -> 409,
/// Validation -> 400, Unauthorized -> 401/403, everything else -> 500.
#[derive(ApiResponse, Debug)]
pub enum ReviewError {
    /// Bad token, unknown employee or contractor
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// A concurrent transition won, or the track was already decided.
    /// Safe to re-fetch and resubmit.
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),

    /// Malformed input or a missing required asset
    #[oai(status = 400)]
    Validation(Json<ErrorResponse>),

    /// Missing or invalid session for a role-gated action
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Authenticated, but the session role does not match the stage
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl ReviewError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ReviewError::NotFound(Json(ErrorResponse {
            error: "not_found".to_string(),
            message: message.into(),
            status_code: 404,
        }))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ReviewError::Conflict(Json(ErrorResponse {
            error: "conflict".to_string(),
            message: message.into(),
            status_code: 409,
        }))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ReviewError::Validation(Json(ErrorResponse {
            error: "validation_error".to_string(),
            message: message.into(),
            status_code: 400,
        }))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ReviewError::Unauthorized(Json(ErrorResponse {
            error: "unauthorized".to_string(),
            message: message.into(),
            status_code: 401,
        }))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ReviewError::Forbidden(Json(ErrorResponse {
            error: "forbidden".to_string(),
            message: message.into(),
            status_code: 403,
        }))
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        ReviewError::InternalError(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message: message.into(),
            status_code: 500,
        }))
    }

    pub fn message(&self) -> String {
        match self {
            ReviewError::NotFound(json) => json.0.message.clone(),
            ReviewError::Conflict(json) => json.0.message.clone(),
            ReviewError::Validation(json) => json.0.message.clone(),
            ReviewError::Unauthorized(json) => json.0.message.clone(),
            ReviewError::Forbidden(json) => json.0.message.clone(),
            ReviewError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for ReviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<SessionError> for ReviewError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Expired | SessionError::Invalid => {
                ReviewError::unauthorized(err.to_string())
            }
            SessionError::Encode(message) => {
                tracing::error!("Session token encoding failed: {}", message);
                ReviewError::internal_error("Internal server error")
            }
        }
    }
}

impl From<StorageError> for ReviewError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io(io) => {
                tracing::error!("Upload storage failed: {}", io);
                ReviewError::internal_error("Failed to store upload")
            }
            other => ReviewError::validation(other.to_string()),
        }
    }
}

impl From<InternalError> for ReviewError {
    fn from(err: InternalError) -> Self {
        match err {
            InternalError::Workflow(workflow) => match workflow {
                WorkflowError::ContractorNotFound(_)
                | WorkflowError::EmployeeNotFound(_)
                | WorkflowError::CardNotFound(_) => ReviewError::not_found(workflow.to_string()),
                WorkflowError::StageNotPending { .. } => {
                    ReviewError::conflict(workflow.to_string())
                }
                WorkflowError::SignatureNotConfigured(_)
                | WorkflowError::HodSignatureMissing(_)
                | WorkflowError::Validation(_) => ReviewError::validation(workflow.to_string()),
            },
            InternalError::Render(render) => match render {
                RenderError::AssetMissing { .. } | RenderError::ImageDecode { .. } => {
                    ReviewError::validation(render.to_string())
                }
                other => {
                    tracing::error!("ID card rendering failed: {}", other);
                    ReviewError::internal_error("ID card rendering failed")
                }
            },
            other => {
                tracing::error!("Internal error: {}", other);
                ReviewError::internal_error("Internal server error")
            }
        }
    }
}
