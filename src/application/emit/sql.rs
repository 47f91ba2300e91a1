//! SQL script: one INSERT per division type, then one per division.

use crate::config::SqlConfig;
use crate::domain::{Division, DivisionType, Hierarchy};

/// Escape a string literal body by doubling single quotes.
pub fn escape_sql(value: &str) -> String {
    value.replace('\'', "''")
}

fn quoted(value: &str) -> String {
    format!("'{}'", escape_sql(value))
}

fn nullable<T: ToString>(value: Option<T>, render: impl Fn(&str) -> String) -> String {
    value
        .map(|v| render(&v.to_string()))
        .unwrap_or_else(|| "NULL".to_string())
}

fn type_insert(sql: &SqlConfig, division_type: &DivisionType) -> String {
    let description = sql.description_template.replace("{name}", &division_type.name);
    format!(
        "INSERT INTO {} (id, name, code, level, parent_type_id, description) VALUES ({}, {}, {}, {}, {}, {});\n",
        sql.types_table,
        division_type.id,
        quoted(&division_type.name),
        quoted(&division_type.code),
        division_type.level,
        nullable(division_type.parent_type_id, str::to_string),
        quoted(&description),
    )
}

fn division_insert(sql: &SqlConfig, division: &Division) -> String {
    format!(
        "INSERT INTO {} (id, type_id, parent_id, name, division_slug) VALUES ({}, {}, {}, {}, {});\n",
        sql.divisions_table,
        quoted(&division.division_id),
        division.type_id,
        nullable(division.parent_id.as_deref(), quoted),
        quoted(&division.name),
        quoted(&division.division_slug),
    )
}

/// Render the full insert script.
///
/// Type inserts follow header order and are emitted even when no row was
/// accepted; division inserts follow input row order.
pub fn render_sql(hierarchy: &Hierarchy, sql: &SqlConfig) -> String {
    let mut script = String::new();
    script.push_str("-- SQL Insert Script for Country Tree Structure\n");
    script.push_str(&format!("-- Generated by {}\n\n", env!("CARGO_PKG_NAME")));

    script.push_str("-- Insert division types\n");
    for division_type in &hierarchy.types {
        script.push_str(&type_insert(sql, division_type));
    }

    script.push_str("\n-- Insert divisions\n");
    for division in hierarchy.divisions() {
        script.push_str(&division_insert(sql, division));
    }
    script
}
