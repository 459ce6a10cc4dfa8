use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;
use sea_orm::{Database, DatabaseConnection};

use gatepass_backend::api::{AdminApi, AuthApi, CardApi, ContractorApi, HealthApi, ReviewApi};
use gatepass_backend::config::{init_logging, AppSettings};
use gatepass_backend::services::{
    ApprovalService, AssetStorage, IdCardRenderer, RegistrationService, SessionService,
};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging().expect("Failed to initialize logging");

    let settings = Arc::new(AppSettings::from_env().expect("Failed to load settings"));

    // Connect to database and run migrations
    let db: DatabaseConnection = Database::connect(&settings.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Connected to database: {}", settings.database_url);

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    tracing::info!("Database migrations completed");

    // Upload directories must exist before the first request
    let storage = Arc::new(AssetStorage::new(
        settings.upload_root.clone(),
        settings.max_upload_bytes,
    ));
    storage
        .init_dirs()
        .expect("Failed to create upload directories");

    let sessions = Arc::new(SessionService::new(
        settings.jwt_secret.clone(),
        settings.session_expiry_secs,
    ));
    let renderer = Arc::new(IdCardRenderer::new(
        settings.company_name.clone(),
        settings.company_address.clone(),
        settings.company_logo.clone(),
    ));
    let registration = Arc::new(RegistrationService::new(db.clone()));
    let approval = Arc::new(ApprovalService::new(
        db.clone(),
        storage.clone(),
        renderer,
        settings.idcard_validity_days,
    ));

    let auth_api = AuthApi::new(settings.clone(), sessions.clone());
    let contractor_api = ContractorApi::new(registration, storage.clone());
    let review_api = ReviewApi::new(approval.clone(), sessions.clone(), storage.clone());
    let admin_api = AdminApi::new(db.clone(), sessions, storage);
    let card_api = CardApi::new(approval);

    let api_service = OpenApiService::new(
        (
            HealthApi,
            auth_api,
            contractor_api,
            review_api,
            admin_api,
            card_api,
        ),
        "Contractor Gate Pass API",
        env!("CARGO_PKG_VERSION"),
    )
    .server("http://localhost:3000/api");

    let ui = api_service.swagger_ui();

    let app = Route::new().nest("/api", api_service).nest("/swagger", ui);

    tracing::info!("Starting server on http://0.0.0.0:3000");
    tracing::info!("Swagger UI available at http://localhost:3000/swagger");

    Server::new(TcpListener::bind("0.0.0.0:3000")).run(app).await
}
