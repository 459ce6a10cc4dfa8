use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::errors::internal::WorkflowError;
use crate::errors::InternalError;
use crate::types::db::hod_signature::{self, Entity as HodSignature};

/// HodSignatureStore manages department HOD signatures
pub struct HodSignatureStore {}

impl HodSignatureStore {
    pub fn new() -> Self {
        Self {}
    }

    /// Insert or update the HOD signature for a department
    pub async fn upsert(
        &self,
        conn: &impl ConnectionTrait,
        department: &str,
        hod_name: &str,
        signature_path: &str,
    ) -> Result<hod_signature::Model, InternalError> {
        let now = Utc::now().timestamp();

        let existing = self.get_by_department(conn, department).await?;

        match existing {
            Some(model) => {
                let mut active: hod_signature::ActiveModel = model.into();
                active.hod_name = Set(hod_name.to_string());
                active.signature_path = Set(signature_path.to_string());
                active.updated_at = Set(now);
                active
                    .update(conn)
                    .await
                    .map_err(|e| InternalError::database("update_hod_signature", e))
            }
            None => {
                let active = hod_signature::ActiveModel {
                    id: Set(Uuid::new_v4().to_string()),
                    department: Set(department.to_string()),
                    hod_name: Set(hod_name.to_string()),
                    signature_path: Set(signature_path.to_string()),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                active
                    .insert(conn)
                    .await
                    .map_err(|e| InternalError::database("insert_hod_signature", e))
            }
        }
    }

    /// HOD signature for a department, if on file
    pub async fn get_by_department(
        &self,
        conn: &impl ConnectionTrait,
        department: &str,
    ) -> Result<Option<hod_signature::Model>, InternalError> {
        HodSignature::find()
            .filter(hod_signature::Column::Department.eq(department))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("get_hod_signature_by_department", e))
    }

    /// HOD signature for a department, erroring when absent
    pub async fn require_by_department(
        &self,
        conn: &impl ConnectionTrait,
        department: &str,
    ) -> Result<hod_signature::Model, InternalError> {
        self.get_by_department(conn, department)
            .await?
            .ok_or_else(|| WorkflowError::HodSignatureMissing(department.to_string()).into())
    }

    /// All department HOD signatures, ordered by department
    pub async fn list(
        &self,
        conn: &impl ConnectionTrait,
    ) -> Result<Vec<hod_signature::Model>, InternalError> {
        HodSignature::find()
            .order_by_asc(hod_signature::Column::Department)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_hod_signatures", e))
    }

    /// Remove the HOD signature for a department
    pub async fn delete_by_department(
        &self,
        conn: &impl ConnectionTrait,
        department: &str,
    ) -> Result<(), InternalError> {
        let result = HodSignature::delete_many()
            .filter(hod_signature::Column::Department.eq(department))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_hod_signature", e))?;

        if result.rows_affected == 0 {
            return Err(WorkflowError::HodSignatureMissing(department.to_string()).into());
        }
        Ok(())
    }
}

impl Default for HodSignatureStore {
    fn default() -> Self {
        Self::new()
    }
}
