//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{EnrichService, SqlExportService};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::TypeRegistry;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding settings, the type registry and the I/O boundary.
///
/// The registry is built once from the settings and shared read-only.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Built-in plus configured division types
    pub registry: Arc<TypeRegistry>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> ApplicationResult<Self> {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> ApplicationResult<Self> {
        let registry = Arc::new(settings.registry()?);
        let settings = Arc::new(settings);

        Ok(Self {
            settings,
            registry,
            fs,
        })
    }

    pub fn enrich_service(&self) -> EnrichService {
        EnrichService::new(
            Arc::clone(&self.fs),
            Arc::clone(&self.registry),
            self.settings.deriver(),
        )
    }

    pub fn sql_export_service(&self) -> SqlExportService {
        SqlExportService::new(
            Arc::clone(&self.fs),
            Arc::clone(&self.registry),
            self.settings.deriver(),
            self.settings.sql.clone(),
        )
    }
}
