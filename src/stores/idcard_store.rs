use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::errors::internal::WorkflowError;
use crate::errors::InternalError;
use crate::types::db::idcard::{self, Entity as IdCard};

/// IdCardStore manages issued ID card records, one per employee
pub struct IdCardStore {}

impl IdCardStore {
    pub fn new() -> Self {
        Self {}
    }

    /// Insert or replace the card record for an employee.
    ///
    /// The employee_id column carries a unique constraint, so re-issuance
    /// can never leave two rows for the same employee: a repeat issue
    /// updates the existing row in place.
    pub async fn upsert_for_employee(
        &self,
        conn: &impl ConnectionTrait,
        employee_id: &str,
        pdf_path: &str,
        issued_at: i64,
        valid_till: i64,
    ) -> Result<idcard::Model, InternalError> {
        let existing = self.find_by_employee(conn, employee_id).await?;

        match existing {
            Some(model) => {
                let mut active: idcard::ActiveModel = model.into();
                active.pdf_path = Set(pdf_path.to_string());
                active.issued_at = Set(issued_at);
                active.valid_till = Set(valid_till);
                active
                    .update(conn)
                    .await
                    .map_err(|e| InternalError::database("update_idcard", e))
            }
            None => {
                let active = idcard::ActiveModel {
                    id: Set(Uuid::new_v4().to_string()),
                    employee_id: Set(employee_id.to_string()),
                    pdf_path: Set(pdf_path.to_string()),
                    issued_at: Set(issued_at),
                    valid_till: Set(valid_till),
                };
                active
                    .insert(conn)
                    .await
                    .map_err(|e| InternalError::database("insert_idcard", e))
            }
        }
    }

    /// Card record for an employee, if issued
    pub async fn find_by_employee(
        &self,
        conn: &impl ConnectionTrait,
        employee_id: &str,
    ) -> Result<Option<idcard::Model>, InternalError> {
        IdCard::find()
            .filter(idcard::Column::EmployeeId.eq(employee_id))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_idcard_by_employee", e))
    }

    /// Card record for an employee, erroring when absent
    pub async fn require_by_employee(
        &self,
        conn: &impl ConnectionTrait,
        employee_id: &str,
    ) -> Result<idcard::Model, InternalError> {
        self.find_by_employee(conn, employee_id)
            .await?
            .ok_or_else(|| WorkflowError::CardNotFound(employee_id.to_string()).into())
    }

    /// Whether a card has been issued for the employee
    pub async fn exists_for_employee(
        &self,
        conn: &impl ConnectionTrait,
        employee_id: &str,
    ) -> Result<bool, InternalError> {
        Ok(self.find_by_employee(conn, employee_id).await?.is_some())
    }
}

impl Default for IdCardStore {
    fn default() -> Self {
        Self::new()
    }
}
