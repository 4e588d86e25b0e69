//! Unified error handling for mapskeys

use thiserror::Error;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Cloud API error: {0}")]
    CloudApi(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Process exit code used by the CLI when this error reaches `main`.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Config(_) => 2,
            AppError::Unauthorized(_) | AppError::Forbidden(_) => 3,
            AppError::NotFound(_) => 4,
            AppError::CloudApi(_) => 5,
            AppError::Internal(_) => 1,
        }
    }
}
