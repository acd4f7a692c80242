//! Error kinds shared by the idea tree, the codec, and the process stack.

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the core and process layers.
///
/// None of these are retried. Validation and invalid-state errors surface at
/// the call that broke the rule; parse and I/O errors come from the load and
/// save paths.
#[derive(Debug, Error)]
pub enum Error {
    /// A value is outside the range its attribute accepts.
    #[error("invalid value: {0}")]
    Validation(String),

    /// The operation is not allowed in the current state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Persisted text could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Reading or writing a file failed.
    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// True for errors caused by the user's input or request rather than the
    /// environment. Menus show these inline instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InvalidState(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
