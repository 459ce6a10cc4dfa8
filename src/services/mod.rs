// Services layer - Business logic over the stores

pub mod approval_service;
pub mod asset_storage;
pub mod idcard_renderer;
pub mod registration_service;
pub mod session_service;

pub use approval_service::{ApprovalService, DecisionOutcome};
pub use asset_storage::{AssetKind, AssetStorage};
pub use idcard_renderer::{CardData, IdCardRenderer};
pub use registration_service::{ContractorRegistration, RegistrationService};
pub use session_service::SessionService;
