//! Output renderers
//!
//! Both renderers produce the whole output in memory; callers write it once.

pub mod enriched;
pub mod sql;

pub use enriched::{render_enriched_csv, DERIVED_COLUMNS};
pub use sql::{escape_sql, render_sql};
