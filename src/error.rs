//! Top-level error type and error handling setup

use crate::{api::error::ApiError, config::ConfigError, services::collector::CollectError};
use thiserror::Error;

/// Exit status for a bad invocation (missing credentials)
pub const EXIT_USAGE: u8 = 2;
/// Exit status for any other fatal error
pub const EXIT_FAILURE: u8 = 1;

/// Errors that end an unlike run
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to create API session: {0}")]
    Session(#[source] ApiError),

    #[error("failed to resolve user: {0}")]
    ResolveUser(#[source] ApiError),

    #[error("resolved user id is empty")]
    EmptyUserId,

    #[error(transparent)]
    Collect(#[from] CollectError),
}

/// Result type alias for unlike runs
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Config(ConfigError::MissingCredential(_)) => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }
}

/// Initialize error handling for the application
pub fn install_error_handlers() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Chain a hook that also records the panic through tracing
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        if let Some(location) = panic_info.location() {
            tracing::error!(
                message = %panic_info,
                panic.file = location.file(),
                panic.line = location.line(),
                panic.column = location.column(),
                "Application panic"
            );
        } else {
            tracing::error!(message = %panic_info, "Application panic");
        }
        default_hook(panic_info);
    }));

    Ok(())
}
