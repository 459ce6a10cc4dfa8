mod common;

use common::{setup, write_png};
use gatepass_backend::errors::{InternalError, WorkflowError};
use gatepass_backend::stores::{HodSignatureStore, IdCardStore, SignatureStore};

#[tokio::test]
async fn role_signature_upsert_replaces_in_place() {
    let env = setup().await;
    let store = SignatureStore::new();

    let first = write_png(&env.storage, "approval_signatures/hr_v1.png");
    store
        .upsert(&env.db, "HR", &first, Some("admin".to_string()))
        .await
        .unwrap();

    let second = write_png(&env.storage, "approval_signatures/hr_v2.png");
    store
        .upsert(&env.db, "HR", &second, Some("admin".to_string()))
        .await
        .unwrap();

    let all = store.list(&env.db).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].file_path, second);
}

#[tokio::test]
async fn missing_role_signature_is_reported() {
    let env = setup().await;
    let err = SignatureStore::new()
        .require_by_role(&env.db, "SYSTEM")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        InternalError::Workflow(WorkflowError::SignatureNotConfigured(_))
    ));
}

#[tokio::test]
async fn hod_signature_upsert_and_delete_round_trip() {
    let env = setup().await;
    let store = HodSignatureStore::new();

    let sig = write_png(&env.storage, "approval_signatures/hod.png");
    store
        .upsert(&env.db, "Production", "Plant Head", &sig)
        .await
        .unwrap();
    store
        .upsert(&env.db, "Production", "New Plant Head", &sig)
        .await
        .unwrap();

    let all = store.list(&env.db).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].hod_name, "New Plant Head");

    store
        .delete_by_department(&env.db, "Production")
        .await
        .unwrap();
    assert!(store
        .get_by_department(&env.db, "Production")
        .await
        .unwrap()
        .is_none());

    // Deleting again reports the absence
    let err = store
        .delete_by_department(&env.db, "Production")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        InternalError::Workflow(WorkflowError::HodSignatureMissing(_))
    ));
}

#[tokio::test]
async fn idcard_upsert_keeps_one_row_per_employee() {
    let env = setup().await;
    common::seed_hod_signature(&env, "Production").await;
    let (_, employee) = common::register_with_employee(&env, "Production", true).await;

    let store = IdCardStore::new();
    store
        .upsert_for_employee(&env.db, &employee.id, "idcards/a.pdf", 1_000, 2_000)
        .await
        .unwrap();
    let replaced = store
        .upsert_for_employee(&env.db, &employee.id, "idcards/b.pdf", 3_000, 4_000)
        .await
        .unwrap();

    assert_eq!(replaced.pdf_path, "idcards/b.pdf");
    let found = store
        .find_by_employee(&env.db, &employee.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.pdf_path, "idcards/b.pdf");
    assert_eq!(found.issued_at, 3_000);
}
