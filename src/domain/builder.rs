//! Hierarchy builder: header row + body rows -> division types and divisions.
//!
//! Every row is self-contained: its own identifier and its parent's identifier
//! are both derived from the row's path, so a parent never has to appear as a
//! row of its own.

use tracing::{debug, instrument};

use crate::domain::entities::{Division, DivisionType, Hierarchy, HierarchyRecord};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::identifier::IdentifierDeriver;
use crate::domain::registry::TypeRegistry;

/// Why a row produced no division.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRejection {
    /// All cells empty
    Blank,
    /// A non-empty cell follows the empty cell at `index`
    Gap { index: usize },
}

/// Builds a [`Hierarchy`] from tabular input.
pub struct HierarchyBuilder<'a> {
    registry: &'a TypeRegistry,
    deriver: IdentifierDeriver,
}

impl<'a> HierarchyBuilder<'a> {
    pub fn new(registry: &'a TypeRegistry, deriver: IdentifierDeriver) -> Self {
        Self { registry, deriver }
    }

    /// Resolve one division type per header column.
    ///
    /// Fails on the first header whose normalized token is not registered.
    pub fn division_types<S: AsRef<str>>(&self, headers: &[S]) -> DomainResult<Vec<DivisionType>> {
        let mut types: Vec<DivisionType> = Vec::with_capacity(headers.len());
        for (level, header) in headers.iter().enumerate() {
            let name = header.as_ref().trim();
            let (token, code) = self.registry.resolve(name)?;
            let id = level as u32 + 1;
            types.push(DivisionType {
                id,
                name: name.to_string(),
                token,
                code: code.to_string(),
                level,
                parent_type_id: types.last().map(|parent| parent.id),
            });
        }
        Ok(types)
    }

    /// Build the full hierarchy.
    ///
    /// Headers are resolved before any row is looked at. Blank and malformed
    /// rows are skipped and counted; accepted rows keep input order and are
    /// not deduplicated.
    #[instrument(level = "debug", skip_all, fields(headers = headers.len(), rows = rows.len()))]
    pub fn build<S: AsRef<str>>(&self, headers: &[S], rows: &[Vec<String>]) -> DomainResult<Hierarchy> {
        let types = self.division_types(headers)?;
        let mut hierarchy = Hierarchy {
            types,
            ..Hierarchy::default()
        };

        for (line, raw) in rows.iter().enumerate() {
            match self.derive_row(&hierarchy.types, raw) {
                Ok(record) => {
                    hierarchy.max_depth = hierarchy.max_depth.max(record.depth);
                    hierarchy.records.push(record);
                }
                Err(RowRejection::Blank) => {
                    debug!("row {}: blank, skipped", line + 1);
                    hierarchy.skipped_blank += 1;
                }
                Err(RowRejection::Gap { index }) => {
                    debug!("row {}: value after empty column {}, skipped", line + 1, index);
                    hierarchy.skipped_malformed += 1;
                }
            }
        }

        debug!(
            "built {} records, max depth {}, skipped {} blank / {} malformed",
            hierarchy.records.len(),
            hierarchy.max_depth,
            hierarchy.skipped_blank,
            hierarchy.skipped_malformed
        );
        Ok(hierarchy)
    }

    /// Derive the record of a single row against resolved types.
    pub fn derive_row(
        &self,
        types: &[DivisionType],
        raw: &[String],
    ) -> Result<HierarchyRecord, RowRejection> {
        let cells: Vec<String> = (0..types.len())
            .map(|i| raw.get(i).cloned().unwrap_or_default())
            .collect();
        let full: Vec<&str> = cells.iter().map(|c| c.trim()).collect();
        let path: Vec<&str> = full.iter().copied().filter(|v| !v.is_empty()).collect();

        if path.is_empty() {
            return Err(RowRejection::Blank);
        }
        if let Some(index) = first_gap(&full) {
            if full[index..].iter().any(|v| !v.is_empty()) {
                return Err(RowRejection::Gap { index });
            }
        }

        let depth = path.len();
        let division = self.division_for(types, &path);
        Ok(HierarchyRecord {
            cells,
            depth,
            division,
        })
    }

    /// Derive the division of an explicit path (root first).
    ///
    /// Blank segments are dropped, like empty cells of a row.
    pub fn derive_path<S: AsRef<str>>(
        &self,
        types: &[DivisionType],
        segments: &[S],
    ) -> DomainResult<Division> {
        let path: Vec<&str> = segments
            .iter()
            .map(|s| s.as_ref().trim())
            .filter(|s| !s.is_empty())
            .collect();
        if path.is_empty() {
            return Err(DomainError::EmptyPath);
        }
        if path.len() > types.len() {
            return Err(DomainError::PathTooDeep {
                depth: path.len(),
                levels: types.len(),
            });
        }
        Ok(self.division_for(types, &path))
    }

    /// `path` is non-empty and no deeper than `types`.
    fn division_for(&self, types: &[DivisionType], path: &[&str]) -> Division {
        let depth = path.len();
        let division_type = &types[depth - 1];
        let identity = self.deriver.derive(&division_type.code, path);

        // re-derived from the truncated path, never looked up
        let parent_id = (depth > 1).then(|| {
            let parent_type = &types[depth - 2];
            self.deriver
                .derive(&parent_type.code, &path[..depth - 1])
                .division_id
        });

        Division {
            division_id: identity.division_id,
            type_id: division_type.id,
            parent_id,
            name: path[depth - 1].to_string(),
            division_slug: identity.division_slug,
        }
    }
}

/// First index `i >= 1` where `full[i]` is empty and `full[i - 1]` is not.
fn first_gap(full: &[&str]) -> Option<usize> {
    (1..full.len()).find(|&i| full[i].is_empty() && !full[i - 1].is_empty())
}
