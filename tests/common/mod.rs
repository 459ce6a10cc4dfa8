use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use printpdf::image_crate::RgbImage;
use sea_orm::{Database, DatabaseConnection};
use tempfile::TempDir;

use gatepass_backend::services::{
    ApprovalService, AssetStorage, IdCardRenderer, RegistrationService,
};
use gatepass_backend::stores::{HodSignatureStore, NewEmployee, SignatureStore};
use gatepass_backend::types::db::{contractor, employee};

pub struct TestEnv {
    pub db: DatabaseConnection,
    pub storage: Arc<AssetStorage>,
    pub approval: Arc<ApprovalService>,
    pub registration: Arc<RegistrationService>,
    _dir: TempDir,
}

pub async fn setup() -> TestEnv {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let storage = Arc::new(AssetStorage::new(dir.path().to_path_buf(), 16 * 1024 * 1024));
    storage.init_dirs().expect("Failed to create upload dirs");

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
    let registration = Arc::new(RegistrationService::new(db.clone()));

    TestEnv {
        db,
        storage,
        approval,
        registration,
        _dir: dir,
    }
}

/// Write a small valid PNG under the upload root and return its
/// relative path
pub fn write_png(storage: &AssetStorage, relative: &str) -> String {
    let path = storage.absolute(relative);
    RgbImage::new(8, 8).save(&path).expect("Failed to write png");
    relative.to_string()
}

/// Seed the HR and SYSTEM role signatures the workflow depends on
pub async fn seed_role_signatures(env: &TestEnv) {
    let store = SignatureStore::new();
    let hr = write_png(&env.storage, "approval_signatures/hr.png");
    store
        .upsert(&env.db, "HR", &hr, Some("admin".to_string()))
        .await
        .expect("Failed to seed HR signature");
    let system = write_png(&env.storage, "approval_signatures/system.png");
    store
        .upsert(&env.db, "SYSTEM", &system, Some("admin".to_string()))
        .await
        .expect("Failed to seed SYSTEM signature");
}

/// Seed a department HOD signature so registration can succeed
pub async fn seed_hod_signature(env: &TestEnv, department: &str) {
    let sig = write_png(&env.storage, "approval_signatures/hod.png");
    HodSignatureStore::new()
        .upsert(&env.db, department, "Plant Head", &sig)
        .await
        .expect("Failed to seed HOD signature");
}

/// Register a contractor in the given department with one employee.
/// When `with_photo` is false the employee has no photo on file.
pub async fn register_with_employee(
    env: &TestEnv,
    department: &str,
    with_photo: bool,
) -> (contractor::Model, employee::Model) {
    let contractor = env
        .registration
        .register(gatepass_backend::services::ContractorRegistration {
            contractor_name: "Sharma Industrial Services".to_string(),
            po_number: Some("PO-1042".to_string()),
            email: Some("office@sharma-services.example".to_string()),
            mobile: Some("9876500001".to_string()),
            department: department.to_string(),
            job_description: Some("Furnace lining repair".to_string()),
            hod_name: None,
        })
        .await
        .expect("Failed to register contractor");

    let photo_path = if with_photo {
        Some(write_png(&env.storage, "employee_photos/worker.png"))
    } else {
        None
    };

    let (_, mut employees) = env
        .registration
        .add_employees(
            &contractor.id,
            vec![NewEmployee {
                first_name: "Ravi".to_string(),
                surname: "Kumar".to_string(),
                dob: Some("1990-04-12".to_string()),
                mobile: Some("9876500002".to_string()),
                photo_path,
                ..Default::default()
            }],
        )
        .await
        .expect("Failed to add employee");

    (contractor, employees.remove(0))
}
