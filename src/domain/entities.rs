//! Domain entities: core data structures

/// One column/level of the hierarchy, derived from the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DivisionType {
    /// Sequential id, 1-based, in header order
    pub id: u32,
    /// Header text as given in the input (trimmed)
    pub name: String,
    /// Normalized header token used for the registry lookup
    pub token: String,
    /// Two-letter prefix from the type registry
    pub code: String,
    /// Zero-based column index
    pub level: usize,
    /// Id of the preceding column's type, none for the first column
    pub parent_type_id: Option<u32>,
}

/// One node of the taxonomy tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Division {
    /// `{type_code}{delimiter}{code}`
    pub division_id: String,
    /// Type of the level this node sits at
    pub type_id: u32,
    /// Identifier of the path without its last segment
    pub parent_id: Option<String>,
    /// Deepest label as written (trimmed)
    pub name: String,
    /// Canonical path from the root to this node
    pub division_slug: String,
}

/// An accepted input row: its raw cells and the division derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyRecord {
    /// Raw cell values, padded to the header width
    pub cells: Vec<String>,
    /// Number of non-empty cells
    pub depth: usize,
    pub division: Division,
}

/// Output of a hierarchy build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hierarchy {
    pub types: Vec<DivisionType>,
    /// Accepted rows in input order, duplicates included
    pub records: Vec<HierarchyRecord>,
    /// Longest accepted path
    pub max_depth: usize,
    /// Rows without any value
    pub skipped_blank: usize,
    /// Rows with a value after a gap
    pub skipped_malformed: usize,
}

impl Hierarchy {
    pub fn divisions(&self) -> impl Iterator<Item = &Division> {
        self.records.iter().map(|r| &r.division)
    }

    /// Header names of the levels that occur in accepted rows.
    pub fn used_levels(&self) -> impl Iterator<Item = &str> {
        self.types
            .iter()
            .take(self.max_depth)
            .map(|t| t.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
