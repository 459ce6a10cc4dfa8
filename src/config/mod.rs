mod logging;
mod settings;

pub use logging::init_logging;
pub use settings::{AppSettings, RoleCredentials, SettingsError};
