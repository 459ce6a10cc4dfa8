use std::sync::Arc;

use poem_openapi::param::{Path, Query};
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::errors::ContractorError;
use crate::services::asset_storage::{AssetKind, AssetStorage};
use crate::services::registration_service::{ContractorRegistration, RegistrationService};
use crate::stores::NewEmployee;
use crate::types::dto::admin::HodSignatureResponse;
use crate::types::dto::contractor::{
    AddEmployeesRequest, AddEmployeesResponse, AssetUploadForm, ContractorStatusResponse,
    EmployeeStatusView, RegisterContractorRequest, RegisterContractorResponse,
    UploadAssetResponse,
};

/// Public contractor intake and status API endpoints.
///
/// Nothing here requires a session; the status lookup is gated by the
/// contractor's access token alone.
pub struct ContractorApi {
    registration: Arc<RegistrationService>,
    storage: Arc<AssetStorage>,
}

impl ContractorApi {
    pub fn new(registration: Arc<RegistrationService>, storage: Arc<AssetStorage>) -> Self {
        Self {
            registration,
            storage,
        }
    }

    async fn store_upload(
        &self,
        kind: AssetKind,
        form: AssetUploadForm,
    ) -> Result<Json<UploadAssetResponse>, ContractorError> {
        let filename = form.file.file_name().unwrap_or_default().to_string();
        let data = form
            .file
            .into_vec()
            .await
            .map_err(|e| ContractorError::validation(format!("Failed to read upload: {}", e)))?;

        let path = self.storage.save(kind, &filename, &data)?;
        Ok(Json(UploadAssetResponse { path }))
    }
}

/// API tags for the contractor surface
#[derive(Tags)]
enum ContractorTags {
    /// Contractor registration and status
    Contractors,
}

#[OpenApi(prefix_path = "/contractors")]
impl ContractorApi {
    /// Register a contractor and receive its access token
    #[oai(path = "/", method = "post", tag = "ContractorTags::Contractors")]
    async fn register(
        &self,
        body: Json<RegisterContractorRequest>,
    ) -> Result<Json<RegisterContractorResponse>, ContractorError> {
        let body = body.0;
        let contractor = self
            .registration
            .register(ContractorRegistration {
                contractor_name: body.contractor_name,
                po_number: body.po_number,
                email: body.email,
                mobile: body.mobile,
                department: body.department,
                job_description: body.job_description,
                hod_name: body.hod_name,
            })
            .await?;

        let hod_signature_path = contractor.hod_signature_path.unwrap_or_default();
        Ok(Json(RegisterContractorResponse {
            contractor_id: contractor.id,
            access_token: contractor.access_token,
            hod_signature_path,
        }))
    }

    /// Submit employees under a contractor; all tracks start pending
    #[oai(
        path = "/:contractor_id/employees",
        method = "post",
        tag = "ContractorTags::Contractors"
    )]
    async fn add_employees(
        &self,
        contractor_id: Path<String>,
        body: Json<AddEmployeesRequest>,
    ) -> Result<Json<AddEmployeesResponse>, ContractorError> {
        let entries = body
            .0
            .employees
            .into_iter()
            .map(|e| NewEmployee {
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
            })
            .collect();

        let (contractor, created) = self
            .registration
            .add_employees(&contractor_id.0, entries)
            .await?;

        Ok(Json(AddEmployeesResponse {
            employee_ids: created.into_iter().map(|e| e.id).collect(),
            access_token: contractor.access_token,
        }))
    }

    /// Upload an employee photo; the returned path goes into the
    /// employee submission
    #[oai(
        path = "/uploads/photo",
        method = "post",
        tag = "ContractorTags::Contractors"
    )]
    async fn upload_photo(
        &self,
        form: AssetUploadForm,
    ) -> Result<Json<UploadAssetResponse>, ContractorError> {
        self.store_upload(AssetKind::EmployeePhoto, form).await
    }

    /// Upload an employee signature image
    #[oai(
        path = "/uploads/signature",
        method = "post",
        tag = "ContractorTags::Contractors"
    )]
    async fn upload_signature(
        &self,
        form: AssetUploadForm,
    ) -> Result<Json<UploadAssetResponse>, ContractorError> {
        self.store_upload(AssetKind::EmployeeSignature, form).await
    }

    /// Look up the status of a submission by access token
    #[oai(path = "/status", method = "get", tag = "ContractorTags::Contractors")]
    async fn status(
        &self,
        token: Query<String>,
    ) -> Result<Json<ContractorStatusResponse>, ContractorError> {
        let (contractor, rows) = self.registration.status_by_token(&token.0).await?;

        let employees = rows
            .into_iter()
            .map(|(e, has_idcard)| {
                let name = match &e.middle_name {
                    Some(middle) if !middle.is_empty() => {
                        format!("{} {} {}", e.first_name, middle, e.surname)
                    }
                    _ => format!("{} {}", e.first_name, e.surname),
                };
                EmployeeStatusView {
                    id: e.id,
                    name,
                    hr_status: e.hr_status,
                    medical_status: e.medical_status,
                    safety_status: e.safety_status,
                    final_status: e.final_status,
                    reject_reason: e.reject_reason,
                    has_idcard,
                }
            })
            .collect();

        Ok(Json(ContractorStatusResponse {
            contractor_id: contractor.id,
            contractor_name: contractor.contractor_name,
            department: contractor.department,
            status: contractor.status,
            employees,
        }))
    }

    /// The HOD signature on file for a department, for form auto-fill
    #[oai(
        path = "/hod-signature/:department",
        method = "get",
        tag = "ContractorTags::Contractors"
    )]
    async fn hod_signature(
        &self,
        department: Path<String>,
    ) -> Result<Json<HodSignatureResponse>, ContractorError> {
        let hod = self.registration.hod_signature(&department.0).await?;
        Ok(Json(HodSignatureResponse {
            department: hod.department,
            hod_name: hod.hod_name,
            signature_path: hod.signature_path,
        }))
    }
}
