use thiserror::Error;

use crate::config::ConfigError;
use mlshare_core::registry::RegistryError;

pub type Result<T> = std::result::Result<T, DeckError>;

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("section registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("terminal error: {message}")]
    Terminal { message: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl DeckError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
