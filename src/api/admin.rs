use std::sync::Arc;

use poem_openapi::param::Path;
use poem_openapi::{payload::Json, OpenApi, Tags};
use sea_orm::DatabaseConnection;

use crate::api::auth::BearerAuth;
use crate::errors::AdminError;
use crate::services::asset_storage::{AssetKind, AssetStorage};
use crate::services::SessionService;
use crate::stores::signature_store::{ROLE_HR, ROLE_SYSTEM};
use crate::stores::{HodSignatureStore, SignatureStore};
use crate::types::dto::admin::{
    HodSignatureUploadForm, HodSignatureView, SignatureUploadForm, SignatureView,
    SignaturesResponse,
};
use crate::types::dto::common::MessageResponse;
use crate::types::internal::auth::Role;

/// Admin API endpoints for managing role and HOD signatures
pub struct AdminApi {
    db: DatabaseConnection,
    signatures: SignatureStore,
    hod_signatures: HodSignatureStore,
    sessions: Arc<SessionService>,
    storage: Arc<AssetStorage>,
}

impl AdminApi {
    pub fn new(
        db: DatabaseConnection,
        sessions: Arc<SessionService>,
        storage: Arc<AssetStorage>,
    ) -> Self {
        Self {
            db,
            signatures: SignatureStore::new(),
            hod_signatures: HodSignatureStore::new(),
            sessions,
            storage,
        }
    }

    fn require_admin(&self, token: &str) -> Result<(), AdminError> {
        self.sessions
            .require_role(token, &[Role::Admin])
            .map_err(|_| AdminError::unauthorized("Admin session required"))?;
        Ok(())
    }

    async fn store_signature_upload(
        &self,
        upload: poem_openapi::types::multipart::Upload,
    ) -> Result<String, AdminError> {
        let filename = upload.file_name().unwrap_or_default().to_string();
        let data = upload
            .into_vec()
            .await
            .map_err(|e| AdminError::validation(format!("Failed to read upload: {}", e)))?;
        Ok(self
            .storage
            .save(AssetKind::ApprovalSignature, &filename, &data)?)
    }
}

/// API tags for admin endpoints
#[derive(Tags)]
enum AdminTags {
    /// Signature management
    Administration,
}

#[OpenApi(prefix_path = "/admin")]
impl AdminApi {
    /// List all stored role and HOD signatures
    #[oai(path = "/signatures", method = "get", tag = "AdminTags::Administration")]
    async fn list_signatures(
        &self,
        auth: BearerAuth,
    ) -> Result<Json<SignaturesResponse>, AdminError> {
        self.require_admin(&auth.0.token)?;

        let signatures = self.signatures.list(&self.db).await?;
        let hod_signatures = self.hod_signatures.list(&self.db).await?;

        Ok(Json(SignaturesResponse {
            signatures: signatures.into_iter().map(SignatureView::from).collect(),
            hod_signatures: hod_signatures
                .into_iter()
                .map(HodSignatureView::from)
                .collect(),
        }))
    }

    /// Upload or replace the signature for a role ("HR" or "SYSTEM")
    #[oai(path = "/signatures", method = "post", tag = "AdminTags::Administration")]
    async fn upsert_signature(
        &self,
        auth: BearerAuth,
        form: SignatureUploadForm,
    ) -> Result<Json<SignatureView>, AdminError> {
        self.require_admin(&auth.0.token)?;

        let role = form.role.trim().to_ascii_uppercase();
        if role != ROLE_HR && role != ROLE_SYSTEM {
            return Err(AdminError::validation(format!(
                "Unknown signature role: {}",
                form.role
            )));
        }

        let path = self.store_signature_upload(form.signature).await?;
        let stored = self
            .signatures
            .upsert(&self.db, &role, &path, form.name)
            .await?;

        tracing::info!(role = %role, "Role signature updated");
        Ok(Json(stored.into()))
    }

    /// Upload or replace the HOD signature for a department
    #[oai(
        path = "/hod-signatures",
        method = "post",
        tag = "AdminTags::Administration"
    )]
    async fn upsert_hod_signature(
        &self,
        auth: BearerAuth,
        form: HodSignatureUploadForm,
    ) -> Result<Json<HodSignatureView>, AdminError> {
        self.require_admin(&auth.0.token)?;

        let department = form.department.trim().to_string();
        if department.is_empty() {
            return Err(AdminError::validation("Department must not be empty"));
        }
        if form.hod_name.trim().is_empty() {
            return Err(AdminError::validation("HOD name must not be empty"));
        }

        let path = self.store_signature_upload(form.signature).await?;
        let stored = self
            .hod_signatures
            .upsert(&self.db, &department, form.hod_name.trim(), &path)
            .await?;

        tracing::info!(department = %department, "HOD signature updated");
        Ok(Json(stored.into()))
    }

    /// Remove the HOD signature for a department
    #[oai(
        path = "/hod-signatures/:department",
        method = "delete",
        tag = "AdminTags::Administration"
    )]
    async fn delete_hod_signature(
        &self,
        auth: BearerAuth,
        department: Path<String>,
    ) -> Result<Json<MessageResponse>, AdminError> {
        self.require_admin(&auth.0.token)?;

        self.hod_signatures
            .delete_by_department(&self.db, &department.0)
            .await?;

        Ok(Json(MessageResponse {
            message: format!("HOD signature removed for department {}", department.0),
        }))
    }
}
