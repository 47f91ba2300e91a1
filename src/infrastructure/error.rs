//! Errors at the process boundary

use std::io;

use thiserror::Error;

use crate::application::ApplicationError;

#[derive(Error, Debug)]
pub enum InfraError {
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Printing a result to the terminal failed (closed pipe, full disk behind a redirect).
    #[error("cannot write to {stream}")]
    Stream {
        stream: &'static str,
        #[source]
        source: io::Error,
    },
}

impl InfraError {
    pub fn stdout(source: io::Error) -> Self {
        Self::Stream {
            stream: "stdout",
            source,
        }
    }
}
