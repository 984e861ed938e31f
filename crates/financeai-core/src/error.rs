//! Error types for FinanceAI

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FinanceError>;

#[derive(Error, Debug)]
pub enum FinanceError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FinanceError {
    /// Client-side errors map to 4xx; everything else is an internal failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            FinanceError::Validation(_) | FinanceError::NotFound(_) | FinanceError::Conflict(_)
        )
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(e: serde_json::Error) -> Self {
        FinanceError::Serialization(e.to_string())
    }
}
