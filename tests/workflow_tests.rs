mod common;

use common::{register_with_employee, seed_hod_signature, seed_role_signatures, setup, write_png};
use gatepass_backend::errors::{InternalError, WorkflowError};
use gatepass_backend::types::internal::workflow::ReviewStage;

const DAY_SECS: i64 = 24 * 60 * 60;

#[tokio::test]
async fn full_approval_chain_issues_an_idcard() {
    let env = setup().await;
    seed_role_signatures(&env).await;
    seed_hod_signature(&env, "Production").await;
    let (contractor, employee) = register_with_employee(&env, "Production", true).await;

    assert_eq!(employee.hr_status, "pending");
    assert_eq!(employee.final_status, "pending");

    // HR approval stamps the stored HR signature
    let outcome = env
        .approval
        .approve(&employee.id, ReviewStage::Hr, "hr_admin".to_string(), None)
        .await
        .unwrap();
    assert!(!outcome.idcard_issued);
    assert_eq!(outcome.employee.hr_status, "approved");
    assert_eq!(
        outcome.employee.hr_signature_path.as_deref(),
        Some("approval_signatures/hr.png")
    );
    assert_eq!(outcome.employee.final_status, "pending");

    // Medical and Safety carry their own signatures
    let medical_sig = write_png(&env.storage, "approval_signatures/medic.png");
    let outcome = env
        .approval
        .approve(
            &employee.id,
            ReviewStage::Medical,
            "Dr. Mehta".to_string(),
            Some(medical_sig),
        )
        .await
        .unwrap();
    assert!(!outcome.idcard_issued);
    assert_eq!(outcome.employee.final_status, "pending");

    let safety_sig = write_png(&env.storage, "approval_signatures/safety.png");
    let outcome = env
        .approval
        .approve(
            &employee.id,
            ReviewStage::Safety,
            "safety_admin".to_string(),
            Some(safety_sig),
        )
        .await
        .unwrap();

    assert!(outcome.idcard_issued);
    assert_eq!(outcome.employee.final_status, "approved");
    assert_eq!(
        outcome.employee.system_signature_path.as_deref(),
        Some("approval_signatures/system.png")
    );

    // Card record exists, PDF is on disk, validity is one year
    let (card, path) = env.approval.card_for_download(&employee.id).await.unwrap();
    assert_eq!(card.valid_till - card.issued_at, 365 * DAY_SECS);
    assert!(path.is_file());

    // Status page reflects the issued card
    let (_, rows) = env
        .registration
        .status_by_token(&contractor.access_token)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].1);
    assert_eq!(rows[0].0.final_status, "approved");
}

#[tokio::test]
async fn hr_rejection_short_circuits_the_chain() {
    let env = setup().await;
    seed_role_signatures(&env).await;
    seed_hod_signature(&env, "Production").await;
    let (_, employee) = register_with_employee(&env, "Production", true).await;

    let outcome = env
        .approval
        .reject(
            &employee.id,
            ReviewStage::Hr,
            "hr_admin".to_string(),
            None,
            None,
        )
        .await
        .unwrap();

    assert_eq!(outcome.employee.hr_status, "rejected");
    assert_eq!(outcome.employee.final_status, "rejected");
    assert_eq!(
        outcome.employee.reject_reason.as_deref(),
        Some("Documents incomplete")
    );

    // A rejected employee never reaches the downstream queues
    assert!(env.approval.queue(ReviewStage::Medical).await.unwrap().is_empty());
    assert!(env.approval.queue(ReviewStage::Safety).await.unwrap().is_empty());
}

#[tokio::test]
async fn rejection_reason_defaults_per_stage() {
    let env = setup().await;
    seed_role_signatures(&env).await;
    seed_hod_signature(&env, "Production").await;
    let (_, employee) = register_with_employee(&env, "Production", true).await;

    env.approval
        .approve(&employee.id, ReviewStage::Hr, "hr_admin".to_string(), None)
        .await
        .unwrap();

    let outcome = env
        .approval
        .reject(
            &employee.id,
            ReviewStage::Medical,
            "Dr. Mehta".to_string(),
            Some("   ".to_string()),
            None,
        )
        .await
        .unwrap();
    assert_eq!(
        outcome.employee.reject_reason.as_deref(),
        Some("Medical fitness issues")
    );
}

#[tokio::test]
async fn queues_gate_on_upstream_approval() {
    let env = setup().await;
    seed_role_signatures(&env).await;
    seed_hod_signature(&env, "Production").await;
    let (_, employee) = register_with_employee(&env, "Production", true).await;

    // Fresh submission sits only in the HR queue
    assert_eq!(env.approval.queue(ReviewStage::Hr).await.unwrap().len(), 1);
    assert!(env.approval.queue(ReviewStage::Medical).await.unwrap().is_empty());
    assert!(env.approval.queue(ReviewStage::Safety).await.unwrap().is_empty());

    env.approval
        .approve(&employee.id, ReviewStage::Hr, "hr_admin".to_string(), None)
        .await
        .unwrap();

    // HR approval moves it to Medical, not Safety
    assert!(env.approval.queue(ReviewStage::Hr).await.unwrap().is_empty());
    let medical = env.approval.queue(ReviewStage::Medical).await.unwrap();
    assert_eq!(medical.len(), 1);
    assert_eq!(medical[0].1.contractor_name, "Sharma Industrial Services");
    assert!(env.approval.queue(ReviewStage::Safety).await.unwrap().is_empty());
}

#[tokio::test]
async fn deciding_a_decided_track_is_a_conflict() {
    let env = setup().await;
    seed_role_signatures(&env).await;
    seed_hod_signature(&env, "Production").await;
    let (_, employee) = register_with_employee(&env, "Production", true).await;

    env.approval
        .approve(&employee.id, ReviewStage::Hr, "hr_admin".to_string(), None)
        .await
        .unwrap();

    let err = env
        .approval
        .approve(&employee.id, ReviewStage::Hr, "hr_admin".to_string(), None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        InternalError::Workflow(WorkflowError::StageNotPending { .. })
    ));

    // Rejecting an approved track loses the same way
    let err = env
        .approval
        .reject(
            &employee.id,
            ReviewStage::Hr,
            "hr_admin".to_string(),
            None,
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        InternalError::Workflow(WorkflowError::StageNotPending { .. })
    ));
}

#[tokio::test]
async fn failed_card_render_rolls_back_the_safety_approval() {
    let env = setup().await;
    seed_role_signatures(&env).await;
    seed_hod_signature(&env, "Production").await;
    // No photo on file, so the render at safety approval must fail
    let (_, employee) = register_with_employee(&env, "Production", false).await;

    env.approval
        .approve(&employee.id, ReviewStage::Hr, "hr_admin".to_string(), None)
        .await
        .unwrap();
    let sig = write_png(&env.storage, "approval_signatures/medic.png");
    env.approval
        .approve(
            &employee.id,
            ReviewStage::Medical,
            "Dr. Mehta".to_string(),
            Some(sig),
        )
        .await
        .unwrap();

    let sig = write_png(&env.storage, "approval_signatures/safety.png");
    let err = env
        .approval
        .approve(
            &employee.id,
            ReviewStage::Safety,
            "safety_admin".to_string(),
            Some(sig),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, InternalError::Workflow(WorkflowError::Validation(_))));

    // The safety track is untouched and retriable, and no card exists
    let (employee, _, card) = env.approval.detail(&employee.id).await.unwrap();
    assert_eq!(employee.safety_status, "pending");
    assert_eq!(employee.final_status, "pending");
    assert!(card.is_none());
}

#[tokio::test]
async fn medical_approval_requires_a_signature_upload() {
    let env = setup().await;
    seed_role_signatures(&env).await;
    seed_hod_signature(&env, "Production").await;
    let (_, employee) = register_with_employee(&env, "Production", true).await;

    env.approval
        .approve(&employee.id, ReviewStage::Hr, "hr_admin".to_string(), None)
        .await
        .unwrap();

    let err = env
        .approval
        .approve(
            &employee.id,
            ReviewStage::Medical,
            "Dr. Mehta".to_string(),
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, InternalError::Workflow(WorkflowError::Validation(_))));

    // Still pending in the medical queue
    assert_eq!(env.approval.queue(ReviewStage::Medical).await.unwrap().len(), 1);
}

#[tokio::test]
async fn hr_approval_fails_without_a_configured_hr_signature() {
    let env = setup().await;
    seed_hod_signature(&env, "Production").await;
    let (_, employee) = register_with_employee(&env, "Production", true).await;

    let err = env
        .approval
        .approve(&employee.id, ReviewStage::Hr, "hr_admin".to_string(), None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        InternalError::Workflow(WorkflowError::SignatureNotConfigured(_))
    ));
}

#[tokio::test]
async fn registration_requires_a_hod_signature_on_file() {
    let env = setup().await;

    let err = env
        .registration
        .register(gatepass_backend::services::ContractorRegistration {
            contractor_name: "Sharma Industrial Services".to_string(),
            po_number: None,
            email: None,
            mobile: None,
            department: "Packaging".to_string(),
            job_description: None,
            hod_name: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        InternalError::Workflow(WorkflowError::HodSignatureMissing(_))
    ));
}

#[tokio::test]
async fn registration_attaches_the_department_hod_signature() {
    let env = setup().await;
    seed_hod_signature(&env, "Production").await;
    let (contractor, _) = register_with_employee(&env, "Production", true).await;

    assert_eq!(
        contractor.hod_signature_path.as_deref(),
        Some("approval_signatures/hod.png")
    );
    assert_eq!(contractor.hod_name.as_deref(), Some("Plant Head"));
    assert_eq!(contractor.access_token.len(), 12);
}

#[tokio::test]
async fn unknown_access_token_is_not_found() {
    let env = setup().await;

    let err = env
        .registration
        .status_by_token("NOSUCHTOKEN1")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        InternalError::Workflow(WorkflowError::ContractorNotFound(_))
    ));
}

#[tokio::test]
async fn card_download_before_issuance_is_not_found() {
    let env = setup().await;
    seed_role_signatures(&env).await;
    seed_hod_signature(&env, "Production").await;
    let (_, employee) = register_with_employee(&env, "Production", true).await;

    let err = env.approval.card_for_download(&employee.id).await.unwrap_err();
    assert!(matches!(
        err,
        InternalError::Workflow(WorkflowError::CardNotFound(_))
    ));
}
