use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

use crate::errors::internal::{InternalError, StorageError, WorkflowError};
use crate::types::dto::common::ErrorResponse;

/// Error responses for the public contractor registration and status surface
#[derive(ApiResponse, Debug)]
pub enum ContractorError {
    /// Unknown access token or contractor id
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Malformed input, missing HOD signature, or a bad upload
    #[oai(status = 400)]
    Validation(Json<ErrorResponse>),

    /// Upload exceeds the configured size limit
    #[oai(status = 413)]
    PayloadTooLarge(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl ContractorError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ContractorError::NotFound(Json(ErrorResponse {
            error: "not_found".to_string(),
            message: message.into(),
            status_code: 404,
        }))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ContractorError::Validation(Json(ErrorResponse {
            error: "validation_error".to_string(),
            message: message.into(),
            status_code: 400,
        }))
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        ContractorError::PayloadTooLarge(Json(ErrorResponse {
            error: "payload_too_large".to_string(),
            message: message.into(),
            status_code: 413,
        }))
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        ContractorError::InternalError(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message: message.into(),
            status_code: 500,
        }))
    }

    pub fn message(&self) -> String {
        match self {
            ContractorError::NotFound(json) => json.0.message.clone(),
            ContractorError::Validation(json) => json.0.message.clone(),
            ContractorError::PayloadTooLarge(json) => json.0.message.clone(),
            ContractorError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for ContractorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<InternalError> for ContractorError {
    fn from(err: InternalError) -> Self {
        match err {
            InternalError::Workflow(workflow) => match workflow {
                WorkflowError::ContractorNotFound(_) | WorkflowError::EmployeeNotFound(_) => {
                    ContractorError::not_found(workflow.to_string())
                }
                WorkflowError::HodSignatureMissing(_) | WorkflowError::Validation(_) => {
                    ContractorError::validation(workflow.to_string())
                }
                other => ContractorError::validation(other.to_string()),
            },
            other => {
                tracing::error!("Internal error: {}", other);
                ContractorError::internal_error("Internal server error")
            }
        }
    }
}

impl From<StorageError> for ContractorError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::TooLarge { .. } => ContractorError::payload_too_large(err.to_string()),
            StorageError::UnsupportedExtension(_) | StorageError::MissingFilename => {
                ContractorError::validation(err.to_string())
            }
            StorageError::Io(io) => {
                tracing::error!("Upload storage failed: {}", io);
                ContractorError::internal_error("Failed to store upload")
            }
        }
    }
}
