use thiserror::Error;

use crate::id::ModuleId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Module not found in table: {id}")]
    UnknownModule { id: ModuleId },

    #[error("Initializer failed: {message}")]
    Init { message: String },
}

impl LoadError {
    /// Build the error an initializer returns to signal its own failure
    pub fn init(message: impl Into<String>) -> Self {
        Self::Init {
            message: message.into(),
        }
    }
}

pub type LoadResult<T> = std::result::Result<T, LoadError>;
