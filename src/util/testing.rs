//! Test support: shared tracing setup and hierarchy CSV fixtures.

use std::path::{Path, PathBuf};
use std::sync::Once;

use tracing::info;
use tracing_subscriber::{fmt, fmt::format::FmtSpan, prelude::*, EnvFilter};

static TEST_SETUP: Once = Once::new();

/// Install one tracing subscriber for the whole test binary.
///
/// `RUST_LOG` wins; otherwise this crate logs at debug and dependencies at warn.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn,divid=debug"));
        let layer = fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(filter);

        if let Err(e) = tracing_subscriber::registry().with(layer).try_init() {
            eprintln!("test logging already initialized: {}", e);
        }
        info!("test setup complete");
    });
}

/// Write a hierarchy CSV into `dir` and return its path.
///
/// Rows are joined with `\n`; a trailing newline is added.
pub fn write_hierarchy_csv(dir: &Path, name: &str, lines: &[&str]) -> std::io::Result<PathBuf> {
    let path = dir.join(name);
    let mut content = lines.join("\n");
    content.push('\n');
    std::fs::write(&path, content)?;
    Ok(path)
}
