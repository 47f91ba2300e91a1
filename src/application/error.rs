//! Errors of a conversion run, wrapping domain errors

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::DomainError;

#[derive(Error, Debug)]
pub enum ApplicationError {
    /// Bad header, bad registry entry or bad `derive` path
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("input file not found: {0}")]
    InputNotFound(PathBuf),

    /// Unreadable or invalid settings
    #[error("config error: {message}")]
    Config { message: String },

    /// Reading, parsing or writing a file; `context` names the action and path.
    #[error("{context}: {source}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApplicationError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
