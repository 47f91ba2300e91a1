//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/divid/divid.toml`
//! 3. Local config: `--config <file>`, else `./.divid.toml` if present
//! 4. Environment variables: `DIVID_*` prefix (`__` separates nested keys)

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{IdentifierDeriver, TypeRegistry, DEFAULT_PREFIX_DELIMITER, DEFAULT_SEPARATOR};

/// Name of the local config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = ".divid.toml";

/// SQL script settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SqlConfig {
    /// Table receiving one row per division type
    pub types_table: String,
    /// Table receiving one row per division
    pub divisions_table: String,
    /// Description of a division type; `{name}` is replaced by the header
    pub description_template: String,
}

impl Default for SqlConfig {
    fn default() -> Self {
        Self {
            types_table: "country_division_types".into(),
            divisions_table: "country_divisions".into(),
            description_template: "Type de division: {name}".into(),
        }
    }
}

/// Raw SQL settings for intermediate parsing (`None` = not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSqlConfig {
    pub types_table: Option<String>,
    pub divisions_table: Option<String>,
    pub description_template: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub prefix_delimiter: Option<String>,
    pub slug_separator: Option<char>,
    pub input: Option<PathBuf>,
    pub csv_output: Option<PathBuf>,
    pub sql_output: Option<PathBuf>,
    pub sql: RawSqlConfig,
    pub division_types: BTreeMap<String, String>,
}

impl SqlConfig {
    /// Overlay wins for every field it specifies.
    pub fn merge(&self, overlay: &RawSqlConfig) -> Self {
        Self {
            types_table: overlay
                .types_table
                .clone()
                .unwrap_or_else(|| self.types_table.clone()),
            divisions_table: overlay
                .divisions_table
                .clone()
                .unwrap_or_else(|| self.divisions_table.clone()),
            description_template: overlay
                .description_template
                .clone()
                .unwrap_or_else(|| self.description_template.clone()),
        }
    }
}

/// Unified configuration for divid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Between type code and hash code (default: "-")
    pub prefix_delimiter: String,
    /// Between alphanumeric runs of a normalized label (default: '-')
    pub slug_separator: char,
    /// Default input file
    pub input: PathBuf,
    /// Default output of CSV mode
    pub csv_output: PathBuf,
    /// Default output of SQL mode
    pub sql_output: PathBuf,
    /// SQL script settings
    pub sql: SqlConfig,
    /// Additional type registry entries: type name -> two-letter code
    pub division_types: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prefix_delimiter: DEFAULT_PREFIX_DELIMITER.into(),
            slug_separator: DEFAULT_SEPARATOR,
            input: PathBuf::from("data.csv"),
            csv_output: PathBuf::from("output.csv"),
            sql_output: PathBuf::from("inserts.sql"),
            sql: SqlConfig::default(),
            division_types: BTreeMap::new(),
        }
    }
}

/// Get the XDG config directory for divid.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "divid").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("divid.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ApplicationError::config(format!("read {}: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| ApplicationError::config(format!("parse {}: {}", path.display(), e)))
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::config(e.to_string())
}

fn is_sql_identifier(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

impl Settings {
    /// Merge overlay config onto self (base).
    ///
    /// - Scalar options: overlay wins if Some, otherwise keep base
    /// - `division_types`: union, overlay wins per key
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        let mut division_types = self.division_types.clone();
        division_types.extend(
            overlay
                .division_types
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        Self {
            prefix_delimiter: overlay
                .prefix_delimiter
                .clone()
                .unwrap_or_else(|| self.prefix_delimiter.clone()),
            slug_separator: overlay.slug_separator.unwrap_or(self.slug_separator),
            input: overlay.input.clone().unwrap_or_else(|| self.input.clone()),
            csv_output: overlay
                .csv_output
                .clone()
                .unwrap_or_else(|| self.csv_output.clone()),
            sql_output: overlay
                .sql_output
                .clone()
                .unwrap_or_else(|| self.sql_output.clone()),
            sql: self.sql.merge(&overlay.sql),
            division_types,
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Explicit local config file; it must exist. Without it,
    ///   `./.divid.toml` is used when present.
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), local, Self::environment())
    }

    /// Load settings from explicit sources.
    ///
    /// A missing `global` file is skipped; a missing explicit `local` file is an error.
    pub fn load_from(
        global: Option<&Path>,
        local: Option<&Path>,
        env: Environment,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global.filter(|p| p.exists()) {
            debug!("loading global config: {}", global_path.display());
            current = current.merge_with(&load_raw_settings(global_path)?);
        }

        // 3. Local config
        let local_path = match local {
            Some(path) if !path.exists() => {
                return Err(ApplicationError::config(format!(
                    "config file not found: {}",
                    path.display()
                )))
            }
            Some(path) => Some(path.to_path_buf()),
            None => Some(PathBuf::from(LOCAL_CONFIG_FILE)).filter(|p| p.exists()),
        };
        if let Some(path) = local_path {
            debug!("loading local config: {}", path.display());
            current = current.merge_with(&load_raw_settings(&path)?);
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current, env)?;

        current.validate()?;
        Ok(current)
    }

    /// `DIVID_*` variables of the process; `__` separates nested keys.
    pub fn environment() -> Environment {
        Environment::with_prefix("DIVID")
            .prefix_separator("_")
            .separator("__")
    }

    /// Apply DIVID_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("prefix_delimiter") {
            settings.prefix_delimiter = val;
        }
        if let Ok(val) = config.get_string("slug_separator") {
            let mut chars = val.chars();
            settings.slug_separator = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(ApplicationError::config(format!(
                        "slug_separator must be a single character: '{}'",
                        val
                    )))
                }
            };
        }
        if let Ok(val) = config.get_string("input") {
            settings.input = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("csv_output") {
            settings.csv_output = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("sql_output") {
            settings.sql_output = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("sql.types_table") {
            settings.sql.types_table = val;
        }
        if let Ok(val) = config.get_string("sql.divisions_table") {
            settings.sql.divisions_table = val;
        }
        if let Ok(val) = config.get_string("sql.description_template") {
            settings.sql.description_template = val;
        }

        Ok(settings)
    }

    /// Reject values the emitters cannot use safely.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        for table in [&self.sql.types_table, &self.sql.divisions_table] {
            if !is_sql_identifier(table) {
                return Err(ApplicationError::config(format!(
                    "invalid SQL table name: '{}'",
                    table
                )));
            }
        }
        if self.slug_separator.is_ascii_alphanumeric() || self.slug_separator == '.' {
            return Err(ApplicationError::config(format!(
                "slug_separator must not be alphanumeric or '.': '{}'",
                self.slug_separator
            )));
        }
        Ok(())
    }

    /// Type registry: built-in prefixes plus configured entries.
    pub fn registry(&self) -> Result<TypeRegistry, ApplicationError> {
        Ok(TypeRegistry::builtin().with_entries(&self.division_types)?)
    }

    /// Identifier deriver with the configured delimiter and separator.
    pub fn deriver(&self) -> IdentifierDeriver {
        IdentifierDeriver::new(self.prefix_delimiter.clone(), self.slug_separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn env(vars: &[(&str, &str)]) -> Environment {
        let source: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::environment().source(Some(source))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.prefix_delimiter, "-");
        assert_eq!(settings.slug_separator, '-');
        assert_eq!(settings.input, PathBuf::from("data.csv"));
        assert_eq!(settings.csv_output, PathBuf::from("output.csv"));
        assert_eq!(settings.sql_output, PathBuf::from("inserts.sql"));
        assert_eq!(settings.sql.types_table, "country_division_types");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_merge_with_overlay_wins_and_types_union() {
        let mut base = Settings::default();
        base.division_types.insert("hameau".into(), "HM".into());

        let overlay: RawSettings = toml::from_str(
            r#"
prefix_delimiter = ":"
[sql]
divisions_table = "geo_divisions"
[division_types]
"Sous-préfecture" = "SP"
"#,
        )
        .unwrap();

        let merged = base.merge_with(&overlay);
        assert_eq!(merged.prefix_delimiter, ":");
        assert_eq!(merged.slug_separator, '-');
        assert_eq!(merged.sql.divisions_table, "geo_divisions");
        assert_eq!(merged.sql.types_table, "country_division_types");
        assert_eq!(merged.division_types.len(), 2);
    }

    #[test]
    fn test_env_overrides_replace_values() {
        let settings = Settings::apply_env_overrides(
            Settings::default(),
            env(&[
                ("DIVID_PREFIX_DELIMITER", "_"),
                ("DIVID_SQL__TYPES_TABLE", "types"),
                ("DIVID_SQL_OUTPUT", "out/geo.sql"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.prefix_delimiter, "_");
        assert_eq!(settings.sql.types_table, "types");
        assert_eq!(settings.sql_output, PathBuf::from("out/geo.sql"));
    }

    #[test]
    fn test_env_override_rejects_long_separator() {
        let result = Settings::apply_env_overrides(
            Settings::default(),
            env(&[("DIVID_SLUG_SEPARATOR", "--")]),
        );
        assert!(matches!(result, Err(ApplicationError::Config { .. })));
    }

    #[test]
    fn test_validate_rejects_bad_table_and_separator() {
        let mut settings = Settings::default();
        settings.sql.types_table = "types; DROP TABLE x".into();
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.slug_separator = 'x';
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.sql.divisions_table = "geo.divisions".into();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_registry_includes_configured_types() {
        let mut settings = Settings::default();
        settings.division_types.insert("Hameau".into(), "HM".into());
        let registry = settings.registry().unwrap();
        assert_eq!(registry.lookup("hameau"), Some("HM"));

        settings.division_types.insert("Bad".into(), "b".into());
        assert!(matches!(
            settings.registry(),
            Err(ApplicationError::Domain(_))
        ));
    }
}
