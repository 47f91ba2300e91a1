//! CSV enrichment service
//!
//! Reads the hierarchy CSV, derives identifiers and writes the input's level
//! columns followed by `parent_id`, `division_id` and `division_slug`.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::application::emit::render_enriched_csv;
use crate::application::services::ExportReport;
use crate::application::{ApplicationResult, IoResultExt, Table};
use crate::domain::{HierarchyBuilder, IdentifierDeriver, TypeRegistry};
use crate::infrastructure::traits::FileSystem;

/// Service producing the enriched CSV.
pub struct EnrichService {
    fs: Arc<dyn FileSystem>,
    registry: Arc<TypeRegistry>,
    deriver: IdentifierDeriver,
}

impl EnrichService {
    /// Create a new enrichment service.
    pub fn new(
        fs: Arc<dyn FileSystem>,
        registry: Arc<TypeRegistry>,
        deriver: IdentifierDeriver,
    ) -> Self {
        Self {
            fs,
            registry,
            deriver,
        }
    }

    /// Enrich `input` into `output`.
    ///
    /// When no row is accepted nothing is written and the report says so.
    #[instrument(skip(self))]
    pub fn run(&self, input: &Path, output: &Path) -> ApplicationResult<ExportReport> {
        let table = Table::read(self.fs.as_ref(), input)?;
        let builder = HierarchyBuilder::new(&self.registry, self.deriver.clone());
        let hierarchy = builder.build(&table.headers, &table.rows)?;

        if hierarchy.is_empty() {
            // the CLI reports this to the user
            info!("no valid records in {}, nothing written", input.display());
            return Ok(ExportReport::new(output.to_path_buf(), false, &hierarchy));
        }

        let content = render_enriched_csv(&hierarchy).with_path_context("render CSV", output)?;
        self.fs
            .ensure_parent(output)
            .with_path_context("create output directory", output)?;
        self.fs
            .write(output, &content)
            .with_path_context("write output", output)?;

        info!(
            "enriched {} records into {}",
            hierarchy.records.len(),
            output.display()
        );
        Ok(ExportReport::new(output.to_path_buf(), true, &hierarchy))
    }
}
