//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the hierarchy rules.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown division type: '{token}' (header '{header}'), update the type registry")]
    UnknownDivisionType { token: String, header: String },

    #[error("invalid type code for '{token}': '{code}' (expected two uppercase letters)")]
    InvalidTypeCode { token: String, code: String },

    #[error("empty division path")]
    EmptyPath,

    #[error("path of depth {depth} exceeds the {levels} declared levels")]
    PathTooDeep { depth: usize, levels: usize },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
