//! Enriched CSV: used level columns followed by the derived fields.

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::domain::Hierarchy;

/// Columns appended after the level columns.
pub const DERIVED_COLUMNS: [&str; 3] = ["parent_id", "division_id", "division_slug"];

/// Render accepted records as CSV (CRLF records, minimal quoting).
///
/// Level columns stop at the deepest accepted path; every record is written,
/// duplicates included.
pub fn render_enriched_csv(hierarchy: &Hierarchy) -> Result<String, csv::Error> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());

    let header: Vec<&str> = hierarchy
        .used_levels()
        .chain(DERIVED_COLUMNS.iter().copied())
        .collect();
    writer.write_record(&header)?;

    for record in &hierarchy.records {
        let division = &record.division;
        let row: Vec<&str> = record
            .cells
            .iter()
            .take(hierarchy.max_depth)
            .map(String::as_str)
            .chain([
                division.parent_id.as_deref().unwrap_or(""),
                division.division_id.as_str(),
                division.division_slug.as_str(),
            ])
            .collect();
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    // all fields come from &str, so the buffer is valid UTF-8
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
