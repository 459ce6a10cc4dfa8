use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::errors::internal::WorkflowError;
use crate::errors::InternalError;
use crate::services::asset_storage::{AssetKind, AssetStorage};
use crate::services::idcard_renderer::{CardData, IdCardRenderer};
use crate::stores::signature_store::{ROLE_HR, ROLE_SYSTEM};
use crate::stores::{
    ContractorStore, EmployeeStore, IdCardStore, SignatureStore, StageDecision,
};
use crate::types::db::{contractor, employee, idcard};
use crate::types::internal::workflow::{ApprovalStatus, ReviewStage};

/// Drives the three-track review workflow and card issuance.
///
/// Stage decisions and card issuance run inside one transaction per
/// request, so a failed render leaves the safety track untouched and
/// the reviewer free to retry.
pub struct ApprovalService {
    db: DatabaseConnection,
    contractors: ContractorStore,
    employees: EmployeeStore,
    signatures: SignatureStore,
    idcards: IdCardStore,
    storage: Arc<AssetStorage>,
    renderer: Arc<IdCardRenderer>,
    idcard_validity_days: i64,
}

/// Outcome of an approve or reject call
#[derive(Debug)]
pub struct DecisionOutcome {
    pub employee: employee::Model,
    pub idcard_issued: bool,
}

impl ApprovalService {
    pub fn new(
        db: DatabaseConnection,
        storage: Arc<AssetStorage>,
        renderer: Arc<IdCardRenderer>,
        idcard_validity_days: i64,
    ) -> Self {
        Self {
            db,
            contractors: ContractorStore::new(),
            employees: EmployeeStore::new(),
            signatures: SignatureStore::new(),
            idcards: IdCardStore::new(),
            storage,
            renderer,
            idcard_validity_days,
        }
    }

    /// Pending entries for a stage, paired with their contractors
    pub async fn queue(
        &self,
        stage: ReviewStage,
    ) -> Result<Vec<(employee::Model, contractor::Model)>, InternalError> {
        let entries = self.employees.queue_for_stage(&self.db, stage).await?;

        let mut by_id: HashMap<String, contractor::Model> = HashMap::new();
        let mut rows = Vec::with_capacity(entries.len());
        for entry in entries {
            let contractor = match by_id.get(&entry.contractor_id) {
                Some(found) => found.clone(),
                None => {
                    let found = self
                        .contractors
                        .find_by_id(&self.db, &entry.contractor_id)
                        .await?;
                    by_id.insert(entry.contractor_id.clone(), found.clone());
                    found
                }
            };
            rows.push((entry, contractor));
        }
        Ok(rows)
    }

    /// Full record for one employee: identity, contractor, card if issued
    pub async fn detail(
        &self,
        employee_id: &str,
    ) -> Result<(employee::Model, contractor::Model, Option<idcard::Model>), InternalError> {
        let employee = self.employees.find_by_id(&self.db, employee_id).await?;
        let contractor = self
            .contractors
            .find_by_id(&self.db, &employee.contractor_id)
            .await?;
        let card = self.idcards.find_by_employee(&self.db, employee_id).await?;
        Ok((employee, contractor, card))
    }

    /// Approve one review track.
    ///
    /// HR approvals stamp the stored HR signature; Medical and Safety
    /// require a signature uploaded with the request. A Safety approval
    /// that completes the chain issues the ID card in the same
    /// transaction.
    pub async fn approve(
        &self,
        employee_id: &str,
        stage: ReviewStage,
        approved_by: String,
        uploaded_signature: Option<String>,
    ) -> Result<DecisionOutcome, InternalError> {
        let signature_path = match stage {
            ReviewStage::Hr => {
                self.signatures
                    .require_by_role(&self.db, ROLE_HR)
                    .await?
                    .file_path
            }
            ReviewStage::Medical | ReviewStage::Safety => uploaded_signature.ok_or_else(|| {
                WorkflowError::Validation(format!(
                    "A signature upload is required for {} approval",
                    stage
                ))
            })?,
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::transaction("approve", e))?;

        let employee = self
            .employees
            .decide_stage(
                &txn,
                employee_id,
                StageDecision {
                    stage,
                    status: ApprovalStatus::Approved,
                    decided_by: approved_by,
                    signature_path: Some(signature_path),
                    reject_reason: None,
                },
            )
            .await?;

        let mut idcard_issued = false;
        if employee.final_status == ApprovalStatus::Approved.as_str() {
            self.issue_card(&txn, &employee).await?;
            idcard_issued = true;
        }

        txn.commit()
            .await
            .map_err(|e| InternalError::transaction("approve_commit", e))?;

        let employee = self.employees.find_by_id(&self.db, employee_id).await?;
        if idcard_issued {
            tracing::info!(employee_id, "ID card issued");
        }
        Ok(DecisionOutcome {
            employee,
            idcard_issued,
        })
    }

    /// Reject one review track, which rejects the employee overall.
    ///
    /// A missing reason falls back to the stage's standard wording.
    pub async fn reject(
        &self,
        employee_id: &str,
        stage: ReviewStage,
        rejected_by: String,
        reason: Option<String>,
        uploaded_signature: Option<String>,
    ) -> Result<DecisionOutcome, InternalError> {
        let reason = reason
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| stage.default_reject_reason().to_string());

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::transaction("reject", e))?;

        self.employees
            .decide_stage(
                &txn,
                employee_id,
                StageDecision {
                    stage,
                    status: ApprovalStatus::Rejected,
                    decided_by: rejected_by,
                    signature_path: uploaded_signature,
                    reject_reason: Some(reason),
                },
            )
            .await?;

        txn.commit()
            .await
            .map_err(|e| InternalError::transaction("reject_commit", e))?;

        let employee = self.employees.find_by_id(&self.db, employee_id).await?;
        Ok(DecisionOutcome {
            employee,
            idcard_issued: false,
        })
    }

    /// The issued card for an employee, with the absolute path of its PDF
    pub async fn card_for_download(
        &self,
        employee_id: &str,
    ) -> Result<(idcard::Model, PathBuf), InternalError> {
        let card = self.idcards.require_by_employee(&self.db, employee_id).await?;
        let path = self.storage.absolute(&card.pdf_path);
        if !path.is_file() {
            return Err(WorkflowError::CardNotFound(employee_id.to_string()).into());
        }
        Ok((card, path))
    }

    /// Render the card PDF and record it, all inside the caller's
    /// transaction. Render failure aborts the transaction via the error
    /// path, so the safety approval is rolled back with it.
    async fn issue_card(
        &self,
        conn: &impl ConnectionTrait,
        employee: &employee::Model,
    ) -> Result<idcard::Model, InternalError> {
        let contractor = self
            .contractors
            .find_by_id(conn, &employee.contractor_id)
            .await?;
        let system_signature = self.signatures.require_by_role(conn, ROLE_SYSTEM).await?;

        let photo_rel = employee.photo_path.as_ref().ok_or_else(|| {
            WorkflowError::Validation(format!(
                "Employee {} has no photo on file",
                employee.id
            ))
        })?;

        let now = Utc::now().timestamp();
        let valid_till = now + self.idcard_validity_days * 24 * 60 * 60;
        let pdf_rel = format!("{}/{}.pdf", AssetKind::IdCard.subdir(), employee.id);

        let card_data = CardData {
            employee,
            contractor: &contractor,
            photo_path: self.storage.absolute(photo_rel),
            system_signature_path: self.storage.absolute(&system_signature.file_path),
            issued_at: now,
            valid_till,
        };
        self.renderer
            .render(&card_data, &self.storage.absolute(&pdf_rel))?;

        self.employees
            .set_system_signature(conn, &employee.id, &system_signature.file_path)
            .await?;

        self.idcards
            .upsert_for_employee(conn, &employee.id, &pdf_rel, now, valid_till)
            .await
    }
}
