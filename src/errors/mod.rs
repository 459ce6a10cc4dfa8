pub mod api;
pub mod internal;

pub use api::{AdminError, AuthError, ContractorError, ReviewError};
pub use internal::{InternalError, RenderError, SessionError, StorageError, WorkflowError};
