use thiserror::Error;

use super::{ConfigError, DataError, HttpError, RenderError, ValidationError};

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
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error("TOML error: {source}")]
    Toml {
        #[from]
        source: toml::de::Error,
    },
    #[error("HTTP client error: {source}")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },
    #[error("Join error: {source}")]
    Join {
        #[from]
        source: tokio::task::JoinError,
    },
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),
    #[error("Data error: {0}")]
    Data(#[from] DataError),
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    #[error("Tracking controller is no longer running.")]
    ControllerStopped,
}

pub type AppResult<T> = Result<T, AppError>;

/// Coarse classification used to pick the notice shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed user input (no vehicle selected, bad flag).
    Validation,
    /// The backend answered, but with an empty or missing payload.
    NoData,
    /// Network, HTTP status, or decode failure.
    Fetch,
    Other,
}

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

    pub fn http<E>(error: E) -> Self
    where
        E: Into<HttpError>,
    {
        error.into().into()
    }

    pub fn data<E>(error: E) -> Self
    where
        E: Into<DataError>,
    {
        error.into().into()
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) | AppError::Clap { .. } | AppError::Config(_) => {
                ErrorKind::Validation
            }
            AppError::Data(DataError::NoGpsData { .. })
            | AppError::Data(DataError::NoRoute { .. })
            | AppError::Data(DataError::NoBreakPoints { .. })
            | AppError::Data(DataError::NoRides { .. })
            | AppError::Data(DataError::RideNotFound { .. }) => ErrorKind::NoData,
            AppError::Http(_)
            | AppError::Reqwest { .. }
            | AppError::Json { .. }
            | AppError::Data(DataError::InvalidCoordinate { .. }) => ErrorKind::Fetch,
            AppError::Io { .. }
            | AppError::Toml { .. }
            | AppError::Join { .. }
            | AppError::Render(_)
            | AppError::ControllerStopped => ErrorKind::Other,
            #[cfg(test)]
            AppError::Data(DataError::TestExpectation { .. })
            | AppError::Data(DataError::TestExpectationValue { .. }) => ErrorKind::Other,
        }
    }
}
