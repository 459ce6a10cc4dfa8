use poem_openapi::types::multipart::Upload;
use poem_openapi::{Multipart, Object};
use serde::{Deserialize, Serialize};

use crate::types::db::{hod_signature, signature};

/// Multipart form for uploading a role signature (HR or SYSTEM)
#[derive(Multipart, Debug)]
pub struct SignatureUploadForm {
    /// Role key ("HR" or "SYSTEM")
    pub role: String,

    /// Name of the uploader, stamped on the record
    pub name: Option<String>,

    /// Signature image
    pub signature: Upload,
}

/// Multipart form for uploading a department HOD signature
#[derive(Multipart, Debug)]
pub struct HodSignatureUploadForm {
    /// Plant department the signature belongs to
    pub department: String,

    /// Head-of-department name
    pub hod_name: String,

    /// Signature image
    pub signature: Upload,
}

/// A stored role signature
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct SignatureView {
    pub role: String,
    pub file_path: String,
    pub uploaded_by: Option<String>,
    pub uploaded_at: i64,
}

impl From<signature::Model> for SignatureView {
    fn from(s: signature::Model) -> Self {
        Self {
            role: s.role,
            file_path: s.file_path,
            uploaded_by: s.uploaded_by,
            uploaded_at: s.uploaded_at,
        }
    }
}

/// A stored department HOD signature
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct HodSignatureView {
    pub department: String,
    pub hod_name: String,
    pub signature_path: String,
    pub updated_at: i64,
}

impl From<hod_signature::Model> for HodSignatureView {
    fn from(h: hod_signature::Model) -> Self {
        Self {
            department: h.department,
            hod_name: h.hod_name,
            signature_path: h.signature_path,
            updated_at: h.updated_at,
        }
    }
}

/// Response model listing all managed signatures
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct SignaturesResponse {
    pub signatures: Vec<SignatureView>,
    pub hod_signatures: Vec<HodSignatureView>,
}

/// Public lookup of a department's HOD signature (used by the
/// registration form to auto-fill)
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct HodSignatureResponse {
    pub department: String,
    pub hod_name: String,
    pub signature_path: String,
}
