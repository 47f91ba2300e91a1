//! Command dispatch

use std::io::{self, Write};
use std::path::Path;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::domain::{Division, HierarchyBuilder};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Run the command selected on the command line.
pub fn execute(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Derive { levels, segments }) => cmd_derive(container, levels, segments),
        Some(Commands::Types) => cmd_types(container),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "divid", &mut io::stdout());
            Ok(())
        }
        None => {
            let settings = &container.settings;
            let input = cli.input.as_deref().unwrap_or(&settings.input);
            let default_output = if cli.sql {
                settings.sql_output.as_path()
            } else {
                settings.csv_output.as_path()
            };
            let output = cli.output.as_deref().unwrap_or(default_output);
            if input == output {
                return Err(CliError::Usage(format!(
                    "output would overwrite input: {}",
                    input.display()
                )));
            }
            if cli.sql {
                cmd_sql(container, input, output)
            } else {
                cmd_enrich(container, input, output)
            }
        }
    }
}

#[instrument(skip(container))]
fn cmd_enrich(container: &ServiceContainer, input: &Path, output: &Path) -> CliResult<()> {
    let report = container.enrich_service().run(input, output)?;
    if report.written {
        output::report("enriched", &report);
    } else {
        output::warning(&format!(
            "no valid records in {}, {} not written",
            input.display(),
            output.display()
        ));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_sql(container: &ServiceContainer, input: &Path, output: &Path) -> CliResult<()> {
    let report = container.sql_export_service().run(input, output)?;
    output::report("SQL script", &report);
    Ok(())
}

/// Derive one division from level names and path labels.
pub fn derive_division(
    container: &ServiceContainer,
    levels: &[String],
    segments: &[String],
) -> CliResult<Division> {
    let builder = HierarchyBuilder::new(&container.registry, container.settings.deriver());
    let types = builder
        .division_types(levels)
        .map_err(crate::application::ApplicationError::from)?;
    let division = builder
        .derive_path(&types, segments)
        .map_err(crate::application::ApplicationError::from)?;
    debug!("derived {:?}", division);
    Ok(division)
}

fn cmd_derive(container: &ServiceContainer, levels: &[String], segments: &[String]) -> CliResult<()> {
    let division = derive_division(container, levels, segments)?;
    write_division(&mut io::stdout().lock(), &division).map_err(InfraError::stdout)?;
    Ok(())
}

fn write_division(out: &mut impl Write, division: &Division) -> io::Result<()> {
    writeln!(out, "division_id:   {}", division.division_id)?;
    writeln!(out, "division_slug: {}", division.division_slug)?;
    writeln!(
        out,
        "parent_id:     {}",
        division.parent_id.as_deref().unwrap_or("-")
    )?;
    writeln!(out, "name:          {}", division.name)?;
    Ok(())
}

fn cmd_types(container: &ServiceContainer) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    for (token, code) in container.registry.iter() {
        writeln!(stdout, "{}", output::registry_entry(code, token)).map_err(InfraError::stdout)?;
    }
    drop(stdout);

    if let Some(path) = crate::config::global_config_path() {
        output::config_file("global config", &path);
    }
    output::config_file("local config", Path::new(crate::config::LOCAL_CONFIG_FILE));
    Ok(())
}
