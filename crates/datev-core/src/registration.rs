//! Static registration table
//!
//! Each version module contributes one `register(&mut RegistrationTable)`
//! call. Adding a version means adding a module and one line to the table
//! builder; nothing in discovery or the registry changes.

use crate::error::DefinitionError;
use crate::format::FormatDefinition;
use crate::meta::MetaDefinition;
use std::collections::BTreeMap;
use tracing::warn;

/// Builds the preamble definition of one version
pub type MetaFactory = fn() -> Result<MetaDefinition, DefinitionError>;

/// Builds one format definition; the result reports its own category and version
pub type FormatFactory = fn() -> Result<FormatDefinition, DefinitionError>;

/// Everything one version module registered.
#[derive(Debug, Clone)]
pub struct VersionModule {
    version: u32,
    path: String,
    meta: Option<MetaFactory>,
    formats: Vec<FormatFactory>,
}

impl VersionModule {
    fn new(version: u32, path: String) -> Self {
        Self {
            version,
            path,
            meta: None,
            formats: Vec::new(),
        }
    }

    pub fn meta(&mut self, factory: MetaFactory) -> &mut Self {
        if self.meta.is_some() {
            warn!(version = self.version, "meta factory registered twice, keeping the last one");
        }
        self.meta = Some(factory);
        self
    }

    pub fn format(&mut self, factory: FormatFactory) -> &mut Self {
        self.formats.push(factory);
        self
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Where the module lives, reported in discovery diagnostics
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn meta_factory(&self) -> Option<MetaFactory> {
        self.meta
    }

    pub fn format_factories(&self) -> &[FormatFactory] {
        &self.formats
    }
}

/// Compiled map from version to the factories of its module.
#[derive(Debug, Clone, Default)]
pub struct RegistrationTable {
    modules: BTreeMap<u32, VersionModule>,
}

impl RegistrationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens (or reopens) the module slot for `version`.
    pub fn version(&mut self, version: u32, path: impl Into<String>) -> &mut VersionModule {
        let path = path.into();
        self.modules
            .entry(version)
            .or_insert_with(|| VersionModule::new(version, path))
    }

    pub fn get(&self, version: u32) -> Option<&VersionModule> {
        self.modules.get(&version)
    }

    /// Modules in ascending version order
    pub fn modules(&self) -> impl Iterator<Item = &VersionModule> {
        self.modules.values()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
