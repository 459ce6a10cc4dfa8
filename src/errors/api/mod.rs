// API-layer error enums, one per surface

pub mod admin;
pub mod auth;
pub mod contractor;
pub mod review;

pub use admin::AdminError;
pub use auth::AuthError;
pub use contractor::ContractorError;
pub use review::ReviewError;
