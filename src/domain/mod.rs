//! Domain layer: identifier derivation and hierarchy reconstruction
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod code;
pub mod entities;
pub mod error;
pub mod identifier;
pub mod registry;
pub mod slug;

pub use builder::{HierarchyBuilder, RowRejection};
pub use code::{base32_encode, derive_code, CODE_LENGTH};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use identifier::{derive, DivisionIdentity, IdentifierDeriver, DEFAULT_PREFIX_DELIMITER};
pub use registry::{TypeRegistry, BUILTIN_TYPES};
pub use slug::{canonical_slug, canonical_slug_with, normalize, normalize_with, DEFAULT_SEPARATOR};
