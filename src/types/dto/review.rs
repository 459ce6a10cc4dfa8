use poem_openapi::types::multipart::Upload;
use poem_openapi::{Multipart, Object};
use serde::{Deserialize, Serialize};

use crate::types::db::{contractor, employee, idcard};

/// Full employee record as shown on review surfaces
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct EmployeeView {
    pub id: String,
    pub contractor_id: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub surname: String,
    pub dob: Option<String>,
    pub father_name: Option<String>,
    pub aadhar: Option<String>,
    pub mobile: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_mobile: Option<String>,
    pub address_present: Option<String>,
    pub address_permanent: Option<String>,
    pub photo_path: Option<String>,
    pub signature_path: Option<String>,
    pub submitted_at: i64,

    pub final_status: String,

    pub hr_status: String,
    pub hr_approved_by: Option<String>,
    pub hr_approved_at: Option<i64>,

    pub medical_status: String,
    pub medical_approved_by: Option<String>,
    pub medical_approved_at: Option<i64>,

    pub safety_status: String,
    pub safety_approved_by: Option<String>,
    pub safety_approved_at: Option<i64>,

    pub reject_reason: Option<String>,
}

impl From<employee::Model> for EmployeeView {
    fn from(e: employee::Model) -> Self {
        Self {
            id: e.id,
            contractor_id: e.contractor_id,
            first_name: e.first_name,
            middle_name: e.middle_name,
            surname: e.surname,
            dob: e.dob,
            father_name: e.father_name,
            aadhar: e.aadhar,
            mobile: e.mobile,
            emergency_contact: e.emergency_contact,
            emergency_mobile: e.emergency_mobile,
            address_present: e.address_present,
            address_permanent: e.address_permanent,
            photo_path: e.photo_path,
            signature_path: e.signature_path,
            submitted_at: e.submitted_at,
            final_status: e.final_status,
            hr_status: e.hr_status,
            hr_approved_by: e.hr_approved_by,
            hr_approved_at: e.hr_approved_at,
            medical_status: e.medical_status,
            medical_approved_by: e.medical_approved_by,
            medical_approved_at: e.medical_approved_at,
            safety_status: e.safety_status,
            safety_approved_by: e.safety_approved_by,
            safety_approved_at: e.safety_approved_at,
            reject_reason: e.reject_reason,
        }
    }
}

/// Contractor summary attached to review entries
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ContractorView {
    pub id: String,
    pub contractor_name: String,
    pub department: String,
    pub po_number: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub hod_name: Option<String>,
}

impl From<contractor::Model> for ContractorView {
    fn from(c: contractor::Model) -> Self {
        Self {
            id: c.id,
            contractor_name: c.contractor_name,
            department: c.department,
            po_number: c.po_number,
            email: c.email,
            mobile: c.mobile,
            hod_name: c.hod_name,
        }
    }
}

/// One row in a review queue
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct QueueEntry {
    pub employee: EmployeeView,
    pub contractor: ContractorView,
}

/// Response model for a stage's review queue
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct QueueResponse {
    /// The stage this queue belongs to
    pub stage: String,
    pub entries: Vec<QueueEntry>,
}

/// Issued ID card summary
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct IdCardView {
    pub pdf_path: String,
    pub issued_at: i64,
    pub valid_till: i64,
}

impl From<idcard::Model> for IdCardView {
    fn from(card: idcard::Model) -> Self {
        Self {
            pdf_path: card.pdf_path,
            issued_at: card.issued_at,
            valid_till: card.valid_till,
        }
    }
}

/// Response model for the review detail view
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct EmployeeDetailResponse {
    pub employee: EmployeeView,
    pub contractor: ContractorView,

    /// The issued ID card, when the employee has completed the chain
    pub idcard: Option<IdCardView>,
}

/// Multipart form for an approval action.
///
/// HR approvals ignore the upload (the HR signature is auto-loaded);
/// Medical and Safety approvals require it.
#[derive(Multipart, Debug)]
pub struct ApprovalForm {
    /// Name of the approving officer
    pub approved_by: Option<String>,

    /// Signature image for this approval
    pub signature: Option<Upload>,
}

/// Multipart form for a rejection action
#[derive(Multipart, Debug)]
pub struct RejectionForm {
    /// Name of the rejecting officer
    pub rejected_by: Option<String>,

    /// Reason for rejection; a stage-specific default applies when absent
    pub reason: Option<String>,

    /// Optional signature image
    pub signature: Option<Upload>,
}

/// Response model for approve/reject actions
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ApprovalActionResponse {
    pub employee_id: String,
    pub stage: String,

    /// The track's status after the action
    pub status: String,

    /// The derived final status after the action
    pub final_status: String,

    /// Whether this action issued an ID card
    pub idcard_issued: bool,
}
