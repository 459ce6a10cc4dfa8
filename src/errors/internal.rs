use thiserror::Error;

/// Internal error type for store and service operations
///
/// Separates infrastructure errors (Database, Transaction) shared by all
/// stores from domain errors (Workflow, Render) specific to a service.
///
/// This error type is NOT exposed via API. API endpoints must explicitly
/// convert these to their surface's ApiResponse error enum.
#[derive(Error, Debug)]
pub enum InternalError {
    /// Database query or operation failed
    #[error("Database error: {operation} failed: {source}")]
    Database {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    /// Database transaction failed
    #[error("Transaction error: {operation} failed: {source}")]
    Transaction {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    /// Approval workflow domain errors
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// ID-card rendering errors
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl InternalError {
    /// Create a database error with context
    pub fn database(operation: impl Into<String>, source: sea_orm::DbErr) -> Self {
        Self::Database {
            operation: operation.into(),
            source,
        }
    }

    /// Create a transaction error with context
    pub fn transaction(operation: impl Into<String>, source: sea_orm::DbErr) -> Self {
        Self::Transaction {
            operation: operation.into(),
            source,
        }
    }
}

/// Approval workflow specific errors
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// No contractor matches the given id or access token
    #[error("Contractor not found: {0}")]
    ContractorNotFound(String),

    /// No employee with the given id
    #[error("Employee not found: {0}")]
    EmployeeNotFound(String),

    /// The track is not pending, so the transition lost the race or the
    /// track was already decided
    #[error("Stage {stage} is not pending for employee {employee_id}")]
    StageNotPending {
        stage: String,
        employee_id: String,
    },

    /// No signature configured for the given role in the signatures table
    #[error("No signature configured for role {0}")]
    SignatureNotConfigured(String),

    /// No HOD signature on file for the department a contractor selected
    #[error("No HOD signature on file for department {0}")]
    HodSignatureMissing(String),

    /// No ID card issued for the employee
    #[error("No ID card issued for employee {0}")]
    CardNotFound(String),

    /// A required input failed validation
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// ID-card rendering errors
///
/// Rendering must never produce a partial card: any of these aborts the
/// issuing transaction and leaves the employee's card record absent.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A required asset (photo, signature, logo) is absent or unreadable
    #[error("Missing {kind} asset at {path}")]
    AssetMissing { kind: String, path: String },

    /// Image decoding failed
    #[error("Failed to decode {kind} image at {path}: {message}")]
    ImageDecode {
        kind: String,
        path: String,
        message: String,
    },

    /// PDF composition or write failed
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    /// Filesystem error while writing the card
    #[error("I/O error writing ID card: {0}")]
    Io(#[from] std::io::Error),
}

/// Session token errors
#[derive(Error, Debug)]
pub enum SessionError {
    /// Token signature valid but past its expiry
    #[error("Session token has expired")]
    Expired,

    /// Malformed token or bad signature
    #[error("Invalid session token")]
    Invalid,

    /// Token could not be encoded
    #[error("Failed to encode session token: {0}")]
    Encode(String),
}

/// Upload storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// File extension not in the allowed set
    #[error("File type not allowed: {0}")]
    UnsupportedExtension(String),

    /// Upload exceeds the configured size limit
    #[error("File exceeds the {limit} byte upload limit")]
    TooLarge { limit: usize },

    /// Upload has no usable filename
    #[error("Upload is missing a filename")]
    MissingFilename,

    /// Filesystem error while persisting the upload
    #[error("I/O error storing upload: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    pub fn asset_missing(kind: impl Into<String>, path: impl Into<String>) -> Self {
        Self::AssetMissing {
            kind: kind.into(),
            path: path.into(),
        }
    }

    pub fn image_decode(
        kind: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::ImageDecode {
            kind: kind.into(),
            path: path.into(),
            message: message.into(),
        }
    }
}
