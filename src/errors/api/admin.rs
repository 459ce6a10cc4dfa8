use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

use crate::errors::internal::{InternalError, SessionError, StorageError, WorkflowError};
use crate::types::dto::common::ErrorResponse;

/// Error responses for the admin signature-management surface
#[derive(ApiResponse, Debug)]
pub enum AdminError {
    /// Missing or invalid admin session
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Malformed input (bad role/department, invalid upload)
    #[oai(status = 400)]
    Validation(Json<ErrorResponse>),

    /// No record for the given role or department
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl AdminError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        AdminError::Unauthorized(Json(ErrorResponse {
            error: "unauthorized".to_string(),
            message: message.into(),
            status_code: 401,
        }))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AdminError::Validation(Json(ErrorResponse {
            error: "validation_error".to_string(),
            message: message.into(),
            status_code: 400,
        }))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AdminError::NotFound(Json(ErrorResponse {
            error: "not_found".to_string(),
            message: message.into(),
            status_code: 404,
        }))
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        AdminError::InternalError(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message: message.into(),
            status_code: 500,
        }))
    }

    pub fn message(&self) -> String {
        match self {
            AdminError::Unauthorized(json) => json.0.message.clone(),
            AdminError::Validation(json) => json.0.message.clone(),
            AdminError::NotFound(json) => json.0.message.clone(),
            AdminError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<SessionError> for AdminError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Expired | SessionError::Invalid => {
                AdminError::unauthorized(err.to_string())
            }
            SessionError::Encode(message) => {
                tracing::error!("Session token encoding failed: {}", message);
                AdminError::internal_error("Internal server error")
            }
        }
    }
}

impl From<StorageError> for AdminError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io(io) => {
                tracing::error!("Upload storage failed: {}", io);
                AdminError::internal_error("Failed to store upload")
            }
            other => AdminError::validation(other.to_string()),
        }
    }
}

impl From<InternalError> for AdminError {
    fn from(err: InternalError) -> Self {
        match err {
            InternalError::Workflow(workflow) => match workflow {
                WorkflowError::HodSignatureMissing(_) | WorkflowError::CardNotFound(_) => {
                    AdminError::not_found(workflow.to_string())
                }
                WorkflowError::Validation(_) => AdminError::validation(workflow.to_string()),
                other => AdminError::not_found(other.to_string()),
            },
            other => {
                tracing::error!("Internal error: {}", other);
                AdminError::internal_error("Internal server error")
            }
        }
    }
}
