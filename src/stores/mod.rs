// Stores layer - Data access and repository pattern

pub mod contractor_store;
pub mod employee_store;
pub mod hod_signature_store;
pub mod idcard_store;
pub mod signature_store;

pub use contractor_store::{ContractorStore, NewContractor};
pub use employee_store::{EmployeeStore, NewEmployee, StageDecision};
pub use hod_signature_store::HodSignatureStore;
pub use idcard_store::IdCardStore;
pub use signature_store::SignatureStore;
