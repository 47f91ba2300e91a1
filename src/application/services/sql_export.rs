//! SQL export service
//!
//! Reads the hierarchy CSV and writes an insert script for the division types
//! and divisions tables. The script is rendered completely before it is
//! written, so a failed run leaves no partial file.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::application::emit::render_sql;
use crate::application::services::ExportReport;
use crate::application::{ApplicationResult, IoResultExt, Table};
use crate::config::SqlConfig;
use crate::domain::{HierarchyBuilder, IdentifierDeriver, TypeRegistry};
use crate::infrastructure::traits::FileSystem;

/// Service producing the SQL insert script.
pub struct SqlExportService {
    fs: Arc<dyn FileSystem>,
    registry: Arc<TypeRegistry>,
    deriver: IdentifierDeriver,
    sql: SqlConfig,
}

impl SqlExportService {
    /// Create a new SQL export service.
    pub fn new(
        fs: Arc<dyn FileSystem>,
        registry: Arc<TypeRegistry>,
        deriver: IdentifierDeriver,
        sql: SqlConfig,
    ) -> Self {
        Self {
            fs,
            registry,
            deriver,
            sql,
        }
    }

    /// Export `input` as SQL into `output`.
    ///
    /// Type inserts are written even when no row is accepted.
    #[instrument(skip(self))]
    pub fn run(&self, input: &Path, output: &Path) -> ApplicationResult<ExportReport> {
        let table = Table::read(self.fs.as_ref(), input)?;
        let builder = HierarchyBuilder::new(&self.registry, self.deriver.clone());
        let hierarchy = builder.build(&table.headers, &table.rows)?;

        let script = render_sql(&hierarchy, &self.sql);
        self.fs
            .ensure_parent(output)
            .with_path_context("create output directory", output)?;
        self.fs
            .write(output, &script)
            .with_path_context("write output", output)?;

        info!(
            "exported {} types and {} divisions into {}",
            hierarchy.types.len(),
            hierarchy.records.len(),
            output.display()
        );
        Ok(ExportReport::new(output.to_path_buf(), true, &hierarchy))
    }
}
