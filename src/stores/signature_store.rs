use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::errors::internal::WorkflowError;
use crate::errors::InternalError;
use crate::types::db::signature::{self, Entity as Signature};

/// Role keys for the signatures table
pub const ROLE_HR: &str = "HR";
pub const ROLE_SYSTEM: &str = "SYSTEM";

/// SignatureStore manages the role-keyed signature singletons
pub struct SignatureStore {}

impl SignatureStore {
    pub fn new() -> Self {
        Self {}
    }

    /// Insert or update the signature for a role
    pub async fn upsert(
        &self,
        conn: &impl ConnectionTrait,
        role: &str,
        file_path: &str,
        uploaded_by: Option<String>,
    ) -> Result<signature::Model, InternalError> {
        let now = Utc::now().timestamp();

        let existing = Signature::find()
            .filter(signature::Column::Role.eq(role))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_signature_by_role", e))?;

        match existing {
            Some(model) => {
                let mut active: signature::ActiveModel = model.into();
                active.file_path = Set(file_path.to_string());
                active.uploaded_by = Set(uploaded_by);
                active.uploaded_at = Set(now);
                active
                    .update(conn)
                    .await
                    .map_err(|e| InternalError::database("update_signature", e))
            }
            None => {
                let active = signature::ActiveModel {
                    id: Set(Uuid::new_v4().to_string()),
                    role: Set(role.to_string()),
                    file_path: Set(file_path.to_string()),
                    uploaded_by: Set(uploaded_by),
                    uploaded_at: Set(now),
                };
                active
                    .insert(conn)
                    .await
                    .map_err(|e| InternalError::database("insert_signature", e))
            }
        }
    }

    /// Signature for a role, if configured
    pub async fn get_by_role(
        &self,
        conn: &impl ConnectionTrait,
        role: &str,
    ) -> Result<Option<signature::Model>, InternalError> {
        Signature::find()
            .filter(signature::Column::Role.eq(role))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("get_signature_by_role", e))
    }

    /// Signature for a role, erroring when not configured
    pub async fn require_by_role(
        &self,
        conn: &impl ConnectionTrait,
        role: &str,
    ) -> Result<signature::Model, InternalError> {
        self.get_by_role(conn, role)
            .await?
            .ok_or_else(|| WorkflowError::SignatureNotConfigured(role.to_string()).into())
    }

    /// All configured role signatures
    pub async fn list(
        &self,
        conn: &impl ConnectionTrait,
    ) -> Result<Vec<signature::Model>, InternalError> {
        Signature::find()
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_signatures", e))
    }
}

impl Default for SignatureStore {
    fn default() -> Self {
        Self::new()
    }
}
