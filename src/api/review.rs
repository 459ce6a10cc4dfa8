use std::sync::Arc;

use poem_openapi::param::Path;
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::auth::BearerAuth;
use crate::errors::ReviewError;
use crate::services::asset_storage::{AssetKind, AssetStorage};
use crate::services::{ApprovalService, SessionService};
use crate::types::dto::review::{
    ApprovalActionResponse, ApprovalForm, EmployeeDetailResponse, QueueEntry, QueueResponse,
    RejectionForm,
};
use crate::types::internal::auth::Role;
use crate::types::internal::workflow::ReviewStage;

/// Review API endpoints for the HR, Medical, and Safety desks
pub struct ReviewApi {
    approval: Arc<ApprovalService>,
    sessions: Arc<SessionService>,
    storage: Arc<AssetStorage>,
}

impl ReviewApi {
    pub fn new(
        approval: Arc<ApprovalService>,
        sessions: Arc<SessionService>,
        storage: Arc<AssetStorage>,
    ) -> Self {
        Self {
            approval,
            sessions,
            storage,
        }
    }

    fn parse_stage(&self, stage: &str) -> Result<ReviewStage, ReviewError> {
        ReviewStage::parse(stage)
            .ok_or_else(|| ReviewError::validation(format!("Unknown review stage: {}", stage)))
    }

    /// Validate the session and confirm its role owns the stage
    fn authorize_stage(
        &self,
        token: &str,
        stage: ReviewStage,
    ) -> Result<crate::types::internal::auth::Claims, ReviewError> {
        let (claims, role) = self.sessions.validate(token)?;
        if role.review_stage() != Some(stage) {
            return Err(ReviewError::forbidden(format!(
                "Role {} cannot act on the {} stage",
                role, stage
            )));
        }
        Ok(claims)
    }

    async fn store_signature(
        &self,
        upload: Option<poem_openapi::types::multipart::Upload>,
    ) -> Result<Option<String>, ReviewError> {
        let Some(upload) = upload else {
            return Ok(None);
        };
        let filename = upload.file_name().unwrap_or_default().to_string();
        let data = upload
            .into_vec()
            .await
            .map_err(|e| ReviewError::validation(format!("Failed to read upload: {}", e)))?;
        let path = self
            .storage
            .save(AssetKind::ApprovalSignature, &filename, &data)?;
        Ok(Some(path))
    }
}

/// API tags for review endpoints
#[derive(Tags)]
enum ReviewTags {
    /// Stage review queues and decisions
    Review,
}

#[OpenApi(prefix_path = "/review")]
impl ReviewApi {
    /// The pending queue for a stage.
    ///
    /// Entries only appear once every upstream stage has approved them.
    #[oai(path = "/:stage/queue", method = "get", tag = "ReviewTags::Review")]
    async fn queue(
        &self,
        auth: BearerAuth,
        stage: Path<String>,
    ) -> Result<Json<QueueResponse>, ReviewError> {
        let stage = self.parse_stage(&stage.0)?;
        self.authorize_stage(&auth.0.token, stage)?;

        let rows = self.approval.queue(stage).await?;
        Ok(Json(QueueResponse {
            stage: stage.to_string(),
            entries: rows
                .into_iter()
                .map(|(employee, contractor)| QueueEntry {
                    employee: employee.into(),
                    contractor: contractor.into(),
                })
                .collect(),
        }))
    }

    /// Full record for one employee, for the review detail view
    #[oai(
        path = "/employees/:employee_id",
        method = "get",
        tag = "ReviewTags::Review"
    )]
    async fn detail(
        &self,
        auth: BearerAuth,
        employee_id: Path<String>,
    ) -> Result<Json<EmployeeDetailResponse>, ReviewError> {
        let (_, role) = self.sessions.validate(&auth.0.token)?;
        if role == Role::Admin {
            return Err(ReviewError::forbidden(
                "Admin sessions cannot access review records",
            ));
        }

        let (employee, contractor, card) = self.approval.detail(&employee_id.0).await?;
        Ok(Json(EmployeeDetailResponse {
            employee: employee.into(),
            contractor: contractor.into(),
            idcard: card.map(Into::into),
        }))
    }

    /// Approve an employee's track for this stage.
    ///
    /// A Safety approval completing the chain issues the ID card before
    /// the response returns.
    #[oai(
        path = "/:stage/employees/:employee_id/approve",
        method = "post",
        tag = "ReviewTags::Review"
    )]
    async fn approve(
        &self,
        auth: BearerAuth,
        stage: Path<String>,
        employee_id: Path<String>,
        form: ApprovalForm,
    ) -> Result<Json<ApprovalActionResponse>, ReviewError> {
        let stage = self.parse_stage(&stage.0)?;
        let claims = self.authorize_stage(&auth.0.token, stage)?;

        let approved_by = form
            .approved_by
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(claims.sub);
        let uploaded_signature = self.store_signature(form.signature).await?;

        let outcome = self
            .approval
            .approve(&employee_id.0, stage, approved_by, uploaded_signature)
            .await?;

        Ok(Json(action_response(stage, outcome)))
    }

    /// Reject an employee's track for this stage, rejecting the
    /// employee overall
    #[oai(
        path = "/:stage/employees/:employee_id/reject",
        method = "post",
        tag = "ReviewTags::Review"
    )]
    async fn reject(
        &self,
        auth: BearerAuth,
        stage: Path<String>,
        employee_id: Path<String>,
        form: RejectionForm,
    ) -> Result<Json<ApprovalActionResponse>, ReviewError> {
        let stage = self.parse_stage(&stage.0)?;
        let claims = self.authorize_stage(&auth.0.token, stage)?;

        let rejected_by = form
            .rejected_by
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(claims.sub);
        let uploaded_signature = self.store_signature(form.signature).await?;

        let outcome = self
            .approval
            .reject(
                &employee_id.0,
                stage,
                rejected_by,
                form.reason,
                uploaded_signature,
            )
            .await?;

        Ok(Json(action_response(stage, outcome)))
    }
}

fn action_response(
    stage: ReviewStage,
    outcome: crate::services::DecisionOutcome,
) -> ApprovalActionResponse {
    let employee = outcome.employee;
    let status = match stage {
        ReviewStage::Hr => employee.hr_status.clone(),
        ReviewStage::Medical => employee.medical_status.clone(),
        ReviewStage::Safety => employee.safety_status.clone(),
    };
    ApprovalActionResponse {
        employee_id: employee.id,
        stage: stage.to_string(),
        status,
        final_status: employee.final_status,
        idcard_issued: outcome.idcard_issued,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use migration::{Migrator, MigratorTrait};
    use poem_openapi::auth::Bearer;
    use poem_openapi::param::Path;
    use printpdf::image_crate::RgbImage;
    use sea_orm::Database;

    use super::ReviewApi;
    use crate::api::auth::BearerAuth;
    use crate::services::{
        ApprovalService, AssetStorage, ContractorRegistration, IdCardRenderer,
        RegistrationService, SessionService,
    };
    use crate::stores::{HodSignatureStore, IdCardStore, NewEmployee};
    use crate::types::internal::auth::Role;

    #[tokio::test]
    async fn detail_includes_the_issued_idcard() {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let storage = Arc::new(AssetStorage::new(dir.path().to_path_buf(), 16 * 1024 * 1024));
        storage.init_dirs().expect("Failed to create upload dirs");

        let sig = storage.absolute("approval_signatures/hod.png");
        RgbImage::new(8, 8).save(&sig).expect("Failed to write png");
        HodSignatureStore::new()
            .upsert(&db, "Production", "Plant Head", "approval_signatures/hod.png")
            .await
            .expect("Failed to seed HOD signature");

        let registration = RegistrationService::new(db.clone());
        let contractor = registration
            .register(ContractorRegistration {
                contractor_name: "Sharma Industrial Services".to_string(),
                department: "Production".to_string(),
                po_number: None,
                email: None,
                mobile: None,
                job_description: None,
                hod_name: None,
            })
            .await
            .expect("Failed to register contractor");
        let (_, mut employees) = registration
            .add_employees(
                &contractor.id,
                vec![NewEmployee {
                    first_name: "Ravi".to_string(),
                    surname: "Kumar".to_string(),
                    ..Default::default()
                }],
            )
            .await
            .expect("Failed to add employee");
        let employee = employees.remove(0);

        let renderer = Arc::new(IdCardRenderer::new(
            "ANSA Deco Glass".to_string(),
            "Manufacturing Unit, Industrial Area".to_string(),
            dir.path().join("no_logo.png"),
        ));
        let approval = Arc::new(ApprovalService::new(
            db.clone(),
            storage.clone(),
            renderer,
            365,
        ));
        let sessions = Arc::new(SessionService::new("test-secret".to_string(), 3600));
        let api = ReviewApi::new(approval, sessions.clone(), storage);

        let token = sessions
            .issue(Role::Hr, "hr_admin")
            .expect("Failed to issue session token");
        let auth = || BearerAuth(Bearer {
            token: token.clone(),
        });

        let before = api
            .detail(auth(), Path(employee.id.clone()))
            .await
            .expect("Detail should succeed before issuance");
        assert!(before.0.idcard.is_none());

        IdCardStore::new()
            .upsert_for_employee(&db, &employee.id, "idcards/card.pdf", 1_000, 2_000)
            .await
            .expect("Failed to seed card record");

        let after = api
            .detail(auth(), Path(employee.id.clone()))
            .await
            .expect("Detail should succeed after issuance");
        let card = after.0.idcard.expect("Detail should carry the issued card");
        assert_eq!(card.pdf_path, "idcards/card.pdf");
        assert_eq!(card.issued_at, 1_000);
        assert_eq!(card.valid_till, 2_000);
    }
}
