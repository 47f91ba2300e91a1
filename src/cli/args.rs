//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Content-addressed identifiers for hierarchical administrative divisions
///
/// Without a subcommand, enriches INPUT into OUTPUT (CSV), or writes an SQL
/// insert script with --sql.
#[derive(Parser, Debug)]
#[command(name = "divid")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Local config file (default: ./.divid.toml if present)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Write SQL inserts instead of an enriched CSV
    #[arg(long)]
    pub sql: bool,

    /// Hierarchy CSV, one column per level (default: data.csv)
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Output file (default: output.csv, or inserts.sql with --sql)
    #[arg(value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Derive the identifier of a single path
    Derive {
        /// Level names, root first (e.g. Pays,Region,Commune)
        #[arg(short, long, value_delimiter = ',', required = true)]
        levels: Vec<String>,

        /// Path labels, root first
        #[arg(required = true)]
        segments: Vec<String>,
    },

    /// List known division types and their codes
    Types,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
