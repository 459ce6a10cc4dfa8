// API layer - HTTP endpoints

pub mod admin;
pub mod auth;
pub mod cards;
pub mod contractor;
pub mod health;
pub mod review;

pub use admin::AdminApi;
pub use auth::{AuthApi, BearerAuth};
pub use cards::CardApi;
pub use contractor::ContractorApi;
pub use health::HealthApi;
pub use review::ReviewApi;
