use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::internal::WorkflowError;
use crate::errors::InternalError;
use crate::types::db::employee::{self, Entity as Employee};
use crate::types::internal::workflow::{derive_final_status, ApprovalStatus, ReviewStage};

/// Input for creating an employee record
#[derive(Debug, Clone, Default)]
pub struct NewEmployee {
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
}

/// A decision applied to one review track of one employee
#[derive(Debug, Clone)]
pub struct StageDecision {
    pub stage: ReviewStage,
    pub status: ApprovalStatus,
    pub decided_by: String,
    pub signature_path: Option<String>,
    pub reject_reason: Option<String>,
}

/// EmployeeStore manages employee records and their per-track statuses
pub struct EmployeeStore {}

impl EmployeeStore {
    pub fn new() -> Self {
        Self {}
    }

    /// Create a new employee under a contractor; all tracks start pending
    pub async fn create(
        &self,
        conn: &impl ConnectionTrait,
        contractor_id: &str,
        data: NewEmployee,
    ) -> Result<employee::Model, InternalError> {
        let now = Utc::now().timestamp();
        let pending = ApprovalStatus::Pending.as_str().to_string();

        let new_employee = employee::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            contractor_id: Set(contractor_id.to_string()),
            first_name: Set(data.first_name),
            middle_name: Set(data.middle_name),
            surname: Set(data.surname),
            dob: Set(data.dob),
            father_name: Set(data.father_name),
            aadhar: Set(data.aadhar),
            mobile: Set(data.mobile),
            emergency_contact: Set(data.emergency_contact),
            emergency_mobile: Set(data.emergency_mobile),
            address_present: Set(data.address_present),
            address_permanent: Set(data.address_permanent),
            photo_path: Set(data.photo_path),
            signature_path: Set(data.signature_path),
            submitted_at: Set(now),
            final_status: Set(pending.clone()),
            hr_status: Set(pending.clone()),
            hr_approved_by: Set(None),
            hr_approved_at: Set(None),
            hr_signature_path: Set(None),
            medical_status: Set(pending.clone()),
            medical_approved_by: Set(None),
            medical_approved_at: Set(None),
            medical_signature_path: Set(None),
            safety_status: Set(pending),
            safety_approved_by: Set(None),
            safety_approved_at: Set(None),
            safety_signature_path: Set(None),
            system_signature_path: Set(None),
            reject_reason: Set(None),
        };

        new_employee
            .insert(conn)
            .await
            .map_err(|e| InternalError::database("create_employee", e))
    }

    /// Find an employee by primary key
    pub async fn find_by_id(
        &self,
        conn: &impl ConnectionTrait,
        employee_id: &str,
    ) -> Result<employee::Model, InternalError> {
        Employee::find_by_id(employee_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_employee_by_id", e))?
            .ok_or_else(|| WorkflowError::EmployeeNotFound(employee_id.to_string()).into())
    }

    /// All employees belonging to a contractor
    pub async fn list_by_contractor(
        &self,
        conn: &impl ConnectionTrait,
        contractor_id: &str,
    ) -> Result<Vec<employee::Model>, InternalError> {
        Employee::find()
            .filter(employee::Column::ContractorId.eq(contractor_id))
            .order_by_asc(employee::Column::SubmittedAt)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_employees_by_contractor", e))
    }

    /// The review queue for a stage.
    ///
    /// Each stage only sees employees whose upstream tracks are already
    /// approved: HR gates Medical, Medical gates Safety. An employee
    /// rejected upstream never appears downstream.
    pub async fn queue_for_stage(
        &self,
        conn: &impl ConnectionTrait,
        stage: ReviewStage,
    ) -> Result<Vec<employee::Model>, InternalError> {
        let pending = ApprovalStatus::Pending.as_str();
        let approved = ApprovalStatus::Approved.as_str();

        let mut query = Employee::find();
        query = match stage {
            ReviewStage::Hr => query.filter(employee::Column::HrStatus.eq(pending)),
            ReviewStage::Medical => query
                .filter(employee::Column::HrStatus.eq(approved))
                .filter(employee::Column::MedicalStatus.eq(pending)),
            ReviewStage::Safety => query
                .filter(employee::Column::HrStatus.eq(approved))
                .filter(employee::Column::MedicalStatus.eq(approved))
                .filter(employee::Column::SafetyStatus.eq(pending)),
        };

        query
            .order_by_asc(employee::Column::SubmittedAt)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("queue_for_stage", e))
    }

    /// Apply an approve/reject decision to one track.
    ///
    /// The status write is a conditional update guarded on the track still
    /// being pending, so a losing concurrent request observes zero rows
    /// affected and fails with StageNotPending instead of double-applying.
    /// Recomputes and persists the derived final status before returning
    /// the updated record.
    pub async fn decide_stage(
        &self,
        conn: &impl ConnectionTrait,
        employee_id: &str,
        decision: StageDecision,
    ) -> Result<employee::Model, InternalError> {
        let now = Utc::now().timestamp();
        let pending = ApprovalStatus::Pending.as_str();
        let (status_col, by_col, at_col, sig_col) = stage_columns(decision.stage);

        let mut update = Employee::update_many()
            .col_expr(status_col, Expr::value(decision.status.as_str()))
            .col_expr(by_col, Expr::value(decision.decided_by.clone()))
            .col_expr(at_col, Expr::value(now))
            .filter(employee::Column::Id.eq(employee_id))
            .filter(status_col.eq(pending));

        if let Some(path) = &decision.signature_path {
            update = update.col_expr(sig_col, Expr::value(path.clone()));
        }
        if let Some(reason) = &decision.reject_reason {
            update = update.col_expr(employee::Column::RejectReason, Expr::value(reason.clone()));
        }

        let result = update
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("decide_stage", e))?;

        if result.rows_affected == 0 {
            // Distinguish a missing employee from a lost race
            let existing = Employee::find_by_id(employee_id)
                .one(conn)
                .await
                .map_err(|e| InternalError::database("decide_stage_check", e))?;
            return match existing {
                None => Err(WorkflowError::EmployeeNotFound(employee_id.to_string()).into()),
                Some(_) => Err(WorkflowError::StageNotPending {
                    stage: decision.stage.to_string(),
                    employee_id: employee_id.to_string(),
                }
                .into()),
            };
        }

        self.recompute_final_status(conn, employee_id).await
    }

    /// Re-derive final_status from the three track statuses and persist it
    async fn recompute_final_status(
        &self,
        conn: &impl ConnectionTrait,
        employee_id: &str,
    ) -> Result<employee::Model, InternalError> {
        let model = self.find_by_id(conn, employee_id).await?;

        let hr = parse_status(&model.hr_status)?;
        let medical = parse_status(&model.medical_status)?;
        let safety = parse_status(&model.safety_status)?;
        let final_status = derive_final_status(hr, medical, safety);

        if final_status.as_str() == model.final_status {
            return Ok(model);
        }

        let mut active: employee::ActiveModel = model.into();
        active.final_status = Set(final_status.as_str().to_string());
        active
            .update(conn)
            .await
            .map_err(|e| InternalError::database("update_final_status", e))
    }

    /// Stamp the SYSTEM signature path used on the employee's ID card
    pub async fn set_system_signature(
        &self,
        conn: &impl ConnectionTrait,
        employee_id: &str,
        signature_path: &str,
    ) -> Result<(), InternalError> {
        let model = self.find_by_id(conn, employee_id).await?;
        let mut active: employee::ActiveModel = model.into();
        active.system_signature_path = Set(Some(signature_path.to_string()));
        active
            .update(conn)
            .await
            .map_err(|e| InternalError::database("set_system_signature", e))?;
        Ok(())
    }
}

impl Default for EmployeeStore {
    fn default() -> Self {
        Self::new()
    }
}

fn stage_columns(
    stage: ReviewStage,
) -> (
    employee::Column,
    employee::Column,
    employee::Column,
    employee::Column,
) {
    match stage {
        ReviewStage::Hr => (
            employee::Column::HrStatus,
            employee::Column::HrApprovedBy,
            employee::Column::HrApprovedAt,
            employee::Column::HrSignaturePath,
        ),
        ReviewStage::Medical => (
            employee::Column::MedicalStatus,
            employee::Column::MedicalApprovedBy,
            employee::Column::MedicalApprovedAt,
            employee::Column::MedicalSignaturePath,
        ),
        ReviewStage::Safety => (
            employee::Column::SafetyStatus,
            employee::Column::SafetyApprovedBy,
            employee::Column::SafetyApprovedAt,
            employee::Column::SafetySignaturePath,
        ),
    }
}

fn parse_status(value: &str) -> Result<ApprovalStatus, InternalError> {
    ApprovalStatus::parse(value).ok_or_else(|| {
        WorkflowError::Validation(format!("Unknown approval status in store: {}", value)).into()
    })
}
