// Database entity definitions (sea-orm)

pub mod contractor;
pub mod employee;
pub mod hod_signature;
pub mod idcard;
pub mod signature;
