//! Tabular input: header row plus body rows, read with the csv crate.

use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::infrastructure::traits::FileSystem;

const BOM: char = '\u{feff}';

/// Parsed CSV: first row as headers, remaining rows as raw cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Parse comma-delimited text.
    ///
    /// Rows may be shorter or longer than the header; blank lines are skipped.
    /// Cells are kept as written, headers are trimmed.
    pub fn parse(content: &str) -> Result<Self, csv::Error> {
        let content = content.strip_prefix(BOM).unwrap_or(content);
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::Headers)
            .from_reader(content.as_bytes());

        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(Self { headers, rows })
    }

    /// Read and parse a CSV file.
    pub fn read(fs: &dyn FileSystem, path: &Path) -> ApplicationResult<Self> {
        if !fs.is_file(path) {
            return Err(ApplicationError::InputNotFound(path.to_path_buf()));
        }
        let content = fs.read_to_string(path).with_path_context("read input", path)?;
        let table = Self::parse(&content).with_path_context("parse CSV", path)?;
        debug!(
            "read {}: {} columns, {} rows",
            path.display(),
            table.headers.len(),
            table.rows.len()
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quoted_and_ragged_rows() {
        let content = "Pays,Region,Commune\nTogo,\"Maritime\",\"Lomé, \"\"centre\"\"\"\nTogo\n\nBénin,Littoral,Cotonou,extra\n";
        let table = Table::parse(content).unwrap();

        assert_eq!(table.headers, vec!["Pays", "Region", "Commune"]);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0][2], "Lomé, \"centre\"");
        assert_eq!(table.rows[1], vec!["Togo"]);
        assert_eq!(table.rows[2].len(), 4);
    }

    #[test]
    fn test_parse_strips_bom_and_trims_headers() {
        let table = Table::parse("\u{feff} Pays , Region\r\n Togo ,Maritime\r\n").unwrap();
        assert_eq!(table.headers, vec!["Pays", "Region"]);
        assert_eq!(table.rows[0], vec![" Togo ", "Maritime"]);
    }

    #[test]
    fn test_parse_empty_input() {
        let table = Table::parse("").unwrap();
        assert!(table.headers.is_empty());
        assert!(table.rows.is_empty());
    }
}
