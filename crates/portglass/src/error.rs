//! CLI error type: wraps core/config errors and adds CLI-only cases.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] portglass_core::CoreError),

    #[error(transparent)]
    Config(#[from] portglass_config::ConfigError),

    #[error("no device with id {id}")]
    DeviceNotFound { id: i64 },

    #[error("no section with id '{id}'")]
    SectionNotFound { id: String },

    #[error("interface '{if_name}' not present in this snapshot")]
    PortNotFound { if_name: String },

    #[error("password change required -- run `portglass passwd` first")]
    PasswordChangeRequired,

    #[error("{message}")]
    Validation { message: String },

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl From<portglass_api::Error> for CliError {
    fn from(err: portglass_api::Error) -> Self {
        Self::Core(err.into())
    }
}

impl CliError {
    /// Whether the failure is a cancelled operation (exit quietly).
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Core(portglass_core::CoreError::Cancelled))
    }
}
