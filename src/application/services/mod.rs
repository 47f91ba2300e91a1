//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on the FileSystem I/O boundary trait
//! but are themselves concrete structs, not traits.

use std::path::PathBuf;

use crate::domain::Hierarchy;

mod enrich;
mod sql_export;

pub use enrich::EnrichService;
pub use sql_export::SqlExportService;

/// Summary of one export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// Target file
    pub output: PathBuf,
    /// False when nothing was written (no accepted rows in CSV mode)
    pub written: bool,
    /// Division types derived from the header
    pub types: usize,
    /// Accepted rows
    pub records: usize,
    /// Deepest accepted path
    pub max_depth: usize,
    pub skipped_blank: usize,
    pub skipped_malformed: usize,
}

impl ExportReport {
    fn new(output: PathBuf, written: bool, hierarchy: &Hierarchy) -> Self {
        Self {
            output,
            written,
            types: hierarchy.types.len(),
            records: hierarchy.records.len(),
            max_depth: hierarchy.max_depth,
            skipped_blank: hierarchy.skipped_blank,
            skipped_malformed: hierarchy.skipped_malformed,
        }
    }
}
