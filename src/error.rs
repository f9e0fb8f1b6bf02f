use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("no task at position {index} (store holds {len})")]
    NotFound { index: usize, len: usize },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// True for load/save failures, as opposed to bad input or a bad index.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Serialization(_))
    }
}
