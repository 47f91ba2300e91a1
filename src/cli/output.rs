//! Terminal messages. `colored` honors NO_COLOR and CLICOLOR_FORCE.

use std::fmt::Display;
use std::path::Path;

use colored::Colorize;

use crate::application::services::ExportReport;

pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "warning".yellow().bold(), msg);
}

/// Summary of an export run: target file, counts, skipped rows.
pub fn report(kind: &str, report: &ExportReport) {
    println!(
        "{} {} {}",
        "✓".green(),
        kind,
        report.output.display().to_string().bold()
    );
    println!(
        "  {} types, {} divisions, max depth {}",
        report.types, report.records, report.max_depth
    );
    if report.skipped_malformed > 0 {
        println!(
            "  {} {} skipped (value after an empty column)",
            report.skipped_malformed.to_string().yellow(),
            rows(report.skipped_malformed)
        );
    }
}

fn rows(n: usize) -> &'static str {
    if n == 1 {
        "row"
    } else {
        "rows"
    }
}

/// One registry entry, code first.
pub fn registry_entry(code: &str, token: &str) -> String {
    format!("  {}  {}", code.cyan().bold(), token)
}

/// A config file location and whether it is currently present.
pub fn config_file(label: &str, path: &Path) {
    let state = if path.is_file() {
        "found".green()
    } else {
        "absent".dimmed()
    };
    println!("{:>14}: {} ({})", label, path.display(), state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_pluralization() {
        assert_eq!(rows(1), "row");
        assert_eq!(rows(0), "rows");
        assert_eq!(rows(3), "rows");
    }

    #[test]
    fn test_registry_entry_contains_code_and_token() {
        colored::control::set_override(false);
        assert_eq!(registry_entry("CM", "commune"), "  CM  commune");
    }
}
