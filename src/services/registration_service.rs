use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::errors::internal::WorkflowError;
use crate::errors::InternalError;
use crate::stores::{
    ContractorStore, EmployeeStore, HodSignatureStore, IdCardStore, NewContractor, NewEmployee,
};
use crate::types::db::{contractor, employee};

/// Input for registering a contractor
#[derive(Debug, Clone)]
pub struct ContractorRegistration {
    pub contractor_name: String,
    pub po_number: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub department: String,
    pub job_description: Option<String>,
    pub hod_name: Option<String>,
}

/// Handles the public intake side: contractor registration, employee
/// submission, and token-based status lookup.
pub struct RegistrationService {
    db: DatabaseConnection,
    contractors: ContractorStore,
    employees: EmployeeStore,
    hod_signatures: HodSignatureStore,
    idcards: IdCardStore,
}

impl RegistrationService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            contractors: ContractorStore::new(),
            employees: EmployeeStore::new(),
            hod_signatures: HodSignatureStore::new(),
            idcards: IdCardStore::new(),
        }
    }

    /// Register a contractor.
    ///
    /// The department's HOD signature must already be on file; it is
    /// attached to the record at this point so later changes to the
    /// department signature do not rewrite past registrations.
    pub async fn register(
        &self,
        input: ContractorRegistration,
    ) -> Result<contractor::Model, InternalError> {
        if input.contractor_name.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "Contractor name must not be empty".to_string(),
            )
            .into());
        }
        if input.department.trim().is_empty() {
            return Err(
                WorkflowError::Validation("Department must not be empty".to_string()).into(),
            );
        }

        let hod = self
            .hod_signatures
            .require_by_department(&self.db, &input.department)
            .await?;

        let contractor = self
            .contractors
            .create(
                &self.db,
                NewContractor {
                    contractor_name: input.contractor_name,
                    po_number: input.po_number,
                    email: input.email,
                    mobile: input.mobile,
                    department: input.department,
                    job_description: input.job_description,
                    hod_name: input.hod_name.or(Some(hod.hod_name.clone())),
                    hod_signature_path: hod.signature_path,
                },
            )
            .await?;

        tracing::info!(
            contractor_id = %contractor.id,
            department = %contractor.department,
            "Contractor registered"
        );
        Ok(contractor)
    }

    /// Submit a batch of employees under a contractor.
    ///
    /// All-or-nothing: one bad record rolls back the whole batch so the
    /// contractor can fix and resubmit.
    pub async fn add_employees(
        &self,
        contractor_id: &str,
        entries: Vec<NewEmployee>,
    ) -> Result<(contractor::Model, Vec<employee::Model>), InternalError> {
        let contractor = self.contractors.find_by_id(&self.db, contractor_id).await?;

        if entries.is_empty() {
            return Err(WorkflowError::Validation(
                "At least one employee is required".to_string(),
            )
            .into());
        }
        for entry in &entries {
            if entry.first_name.trim().is_empty() || entry.surname.trim().is_empty() {
                return Err(WorkflowError::Validation(
                    "Employee first name and surname are required".to_string(),
                )
                .into());
            }
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::transaction("add_employees", e))?;

        let mut created = Vec::with_capacity(entries.len());
        for entry in entries {
            created.push(self.employees.create(&txn, &contractor.id, entry).await?);
        }

        txn.commit()
            .await
            .map_err(|e| InternalError::transaction("add_employees_commit", e))?;

        tracing::info!(
            contractor_id = %contractor.id,
            count = created.len(),
            "Employees submitted"
        );
        Ok((contractor, created))
    }

    /// The HOD signature on file for a department, used by the
    /// registration form to auto-fill before submission
    pub async fn hod_signature(
        &self,
        department: &str,
    ) -> Result<crate::types::db::hod_signature::Model, InternalError> {
        self.hod_signatures
            .require_by_department(&self.db, department)
            .await
    }

    /// Resolve an access token to the contractor and its employees,
    /// flagging which employees already have a card issued
    pub async fn status_by_token(
        &self,
        token: &str,
    ) -> Result<(contractor::Model, Vec<(employee::Model, bool)>), InternalError> {
        let contractor = self.contractors.find_by_token(&self.db, token).await?;
        let employees = self
            .employees
            .list_by_contractor(&self.db, &contractor.id)
            .await?;

        let mut rows = Vec::with_capacity(employees.len());
        for employee in employees {
            let has_card = self
                .idcards
                .exists_for_employee(&self.db, &employee.id)
                .await?;
            rows.push((employee, has_card));
        }
        Ok((contractor, rows))
    }
}
