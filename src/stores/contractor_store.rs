use chrono::Utc;
use rand::Rng;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::errors::internal::WorkflowError;
use crate::errors::InternalError;
use crate::types::db::contractor::{self, Entity as Contractor};

/// Characters used for access tokens: unambiguous to read out over the phone
const TOKEN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const TOKEN_LENGTH: usize = 12;

/// Input for creating a contractor record
#[derive(Debug, Clone)]
pub struct NewContractor {
    pub contractor_name: String,
    pub po_number: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub department: String,
    pub job_description: Option<String>,
    pub hod_name: Option<String>,
    pub hod_signature_path: String,
}

/// ContractorStore manages contractor records and their access tokens
pub struct ContractorStore {}

impl ContractorStore {
    pub fn new() -> Self {
        Self {}
    }

    /// Generate a random access token for a contractor.
    ///
    /// Uniqueness is enforced by the store's unique constraint; with 36^12
    /// possible tokens a collision retry loop is not worth carrying.
    pub fn generate_access_token(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..TOKEN_LENGTH)
            .map(|_| TOKEN_CHARSET[rng.gen_range(0..TOKEN_CHARSET.len())] as char)
            .collect()
    }

    /// Create a new contractor record, including its access token
    pub async fn create(
        &self,
        conn: &impl ConnectionTrait,
        data: NewContractor,
    ) -> Result<contractor::Model, InternalError> {
        let now = Utc::now().timestamp();

        let new_contractor = contractor::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            contractor_name: Set(data.contractor_name),
            po_number: Set(data.po_number),
            email: Set(data.email),
            mobile: Set(data.mobile),
            department: Set(data.department),
            job_description: Set(data.job_description),
            hod_name: Set(data.hod_name),
            hod_signature_path: Set(Some(data.hod_signature_path)),
            submitted_at: Set(now),
            status: Set("pending".to_string()),
            access_token: Set(self.generate_access_token()),
        };

        new_contractor
            .insert(conn)
            .await
            .map_err(|e| InternalError::database("create_contractor", e))
    }

    /// Find a contractor by primary key
    pub async fn find_by_id(
        &self,
        conn: &impl ConnectionTrait,
        contractor_id: &str,
    ) -> Result<contractor::Model, InternalError> {
        Contractor::find_by_id(contractor_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_contractor_by_id", e))?
            .ok_or_else(|| WorkflowError::ContractorNotFound(contractor_id.to_string()).into())
    }

    /// Resolve an access token to its owning contractor.
    ///
    /// Read-only and side-effect-free; fails with ContractorNotFound when
    /// no contractor carries the token.
    pub async fn find_by_token(
        &self,
        conn: &impl ConnectionTrait,
        token: &str,
    ) -> Result<contractor::Model, InternalError> {
        Contractor::find()
            .filter(contractor::Column::AccessToken.eq(token))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_contractor_by_token", e))?
            .ok_or_else(|| WorkflowError::ContractorNotFound(token.to_string()).into())
    }
}

impl Default for ContractorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_tokens_use_the_expected_alphabet_and_length() {
        let store = ContractorStore::new();
        for _ in 0..32 {
            let token = store.generate_access_token();
            assert_eq!(token.len(), TOKEN_LENGTH);
            assert!(token
                .bytes()
                .all(|b| TOKEN_CHARSET.contains(&b)));
        }
    }

    #[test]
    fn access_tokens_are_not_repeated() {
        let store = ContractorStore::new();
        let a = store.generate_access_token();
        let b = store.generate_access_token();
        assert_ne!(a, b);
    }
}
