use poem_openapi::types::multipart::Upload;
use poem_openapi::{Multipart, Object};
use serde::{Deserialize, Serialize};

/// Request model for contractor registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegisterContractorRequest {
    /// Contractor company name
    pub contractor_name: String,

    /// Purchase order number
    pub po_number: Option<String>,

    /// Contact email
    pub email: Option<String>,

    /// Contact mobile number
    pub mobile: Option<String>,

    /// Plant department the contractor will work for
    pub department: String,

    /// Description of the contracted job
    pub job_description: Option<String>,

    /// Head-of-department name as entered on the form
    pub hod_name: Option<String>,
}

/// Response model for contractor registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegisterContractorResponse {
    /// Id of the created contractor
    pub contractor_id: String,

    /// Capability token for unauthenticated status lookup
    pub access_token: String,

    /// HOD signature auto-attached from the department record
    pub hod_signature_path: String,
}

/// One employee in an add-employees request
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct NewEmployeeRequest {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub surname: String,

    /// Date of birth (ISO date string)
    pub dob: Option<String>,
    pub father_name: Option<String>,
    pub aadhar: Option<String>,
    pub mobile: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_mobile: Option<String>,
    pub address_present: Option<String>,
    pub address_permanent: Option<String>,

    /// Stored photo path returned by the photo upload endpoint
    pub photo_path: Option<String>,

    /// Stored signature path returned by the signature upload endpoint
    pub signature_path: Option<String>,
}

/// Request model for adding employees under a contractor
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AddEmployeesRequest {
    pub employees: Vec<NewEmployeeRequest>,
}

/// Response model for adding employees
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AddEmployeesResponse {
    /// Ids of the created employees
    pub employee_ids: Vec<String>,

    /// The contractor's access token, surfaced so the caller can keep it
    pub access_token: String,
}

/// Multipart form for uploading a photo or signature asset
#[derive(Multipart, Debug)]
pub struct AssetUploadForm {
    /// The file to store
    pub file: Upload,
}

/// Response model for asset uploads
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UploadAssetResponse {
    /// Stored path, to be referenced from later requests
    pub path: String,
}

/// Per-employee status line on the public status page
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct EmployeeStatusView {
    pub id: String,

    /// Full name (first, middle, surname)
    pub name: String,

    pub hr_status: String,
    pub medical_status: String,
    pub safety_status: String,
    pub final_status: String,

    /// Reason recorded on rejection, if any
    pub reject_reason: Option<String>,

    /// Whether an ID card has been issued
    pub has_idcard: bool,
}

/// Response model for the token-keyed status lookup
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ContractorStatusResponse {
    pub contractor_id: String,
    pub contractor_name: String,
    pub department: String,
    pub status: String,
    pub employees: Vec<EmployeeStatusView>,
}
