use thiserror::Error;

use super::{ApiError, AuthError, ConfigError, ValidationError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("CLI error: {source}")]
    Clap {
        #[from]
        source: clap::Error,
    },
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation<E>(error: E) -> Self
    where
        E: Into<ValidationError>,
    {
        error.into().into()
    }

    pub fn config<E>(error: E) -> Self
    where
        E: Into<ConfigError>,
    {
        error.into().into()
    }

    pub fn api<E>(error: E) -> Self
    where
        E: Into<ApiError>,
    {
        error.into().into()
    }

    pub fn auth<E>(error: E) -> Self
    where
        E: Into<AuthError>,
    {
        error.into().into()
    }

    /// True when the failure means the bearer token was rejected.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        match self {
            AppError::Api(err) => err.is_unauthorized(),
            AppError::Auth(AuthError::Unauthorized) => true,
            AppError::Io { .. }
            | AppError::Clap { .. }
            | AppError::Validation(_)
            | AppError::Config(_)
            | AppError::Auth(_) => false,
        }
    }
}
