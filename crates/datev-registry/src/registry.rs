//! Definition Registry
//!
//! Typed lookups over a [`Discovery`], handing out one shared instance per
//! definition and cache generation.

use crate::discovery::{Catalog, Discovery, VersionEntry};
use datev_core::{Category, DatevError, FormatDefinition, MetaDefinition, RegistrationTable, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Cached lookup façade over one discovery catalog.
///
/// Within one cache generation repeated lookups return the same `Arc`, so
/// callers may compare definitions with [`Arc::ptr_eq`].
#[derive(Debug)]
pub struct Registry {
    discovery: Discovery,
    metas: RefCell<HashMap<u32, Arc<MetaDefinition>>>,
    formats: RefCell<HashMap<(Category, u32), Arc<FormatDefinition>>>,
}

impl Registry {
    pub fn new(table: RegistrationTable) -> Self {
        Self {
            discovery: Discovery::new(table),
            metas: RefCell::new(HashMap::new()),
            formats: RefCell::new(HashMap::new()),
        }
    }

    /// Registry over every version module shipped with `datev-formats`
    pub fn builtin() -> Self {
        Self::new(datev_formats::builtin_table())
    }

    pub fn discovery(&self) -> &Discovery {
        &self.discovery
    }

    /// Meta definition of a supported version
    pub fn get(&self, version: u32) -> Result<Arc<MetaDefinition>> {
        if let Some(meta) = self.metas.borrow().get(&version) {
            return Ok(Arc::clone(meta));
        }

        let factory = self
            .discovery
            .catalog()
            .entry(version)
            .and_then(VersionEntry::meta_factory)
            .ok_or_else(|| DatevError::version_not_supported(version))?;

        debug!(version, "instantiating meta definition");
        let meta = Arc::new(factory()?);
        self.metas.borrow_mut().insert(version, Arc::clone(&meta));
        Ok(meta)
    }

    /// Format definition of a supported (category, version) pair
    pub fn get_format_definition(&self, category: Category, version: u32) -> Result<Arc<FormatDefinition>> {
        if let Some(definition) = self.formats.borrow().get(&(category, version)) {
            return Ok(Arc::clone(definition));
        }

        let factory = self
            .supported_entry(category, version)?
            .formats
            .get(&category)
            .map(|handle| handle.factory())
            .ok_or_else(|| DatevError::format_not_supported(category, version))?;

        debug!(%category, version, "instantiating format definition");
        let definition = Arc::new(factory()?);
        self.formats
            .borrow_mut()
            .insert((category, version), Arc::clone(&definition));
        Ok(definition)
    }

    /// Typed category handle for a supported (category, version) pair
    pub fn get_format_enum(&self, category: Category, version: u32) -> Result<Category> {
        self.supported_entry(category, version).map(|_| category)
    }

    pub fn get_supported_versions(&self) -> Vec<u32> {
        self.discovery.get_supported_versions()
    }

    pub fn get_available_versions(&self) -> Vec<u32> {
        self.discovery.get_available_versions()
    }

    /// Drops instantiated singletons; the catalog is kept
    pub fn clear_cache(&self) {
        self.metas.borrow_mut().clear();
        self.formats.borrow_mut().clear();
    }

    /// Populates the catalog. Without `force` this is a no-op once populated
    /// and cached singletons stay; with `force` the cache is dropped and the
    /// table rescanned.
    pub fn discover(&mut self, force: bool) -> &Catalog {
        if force {
            self.clear_cache();
        }
        self.discovery.discover(force)
    }

    /// Drops singletons and rescans the registration table
    pub fn refresh(&mut self) {
        self.clear_cache();
        self.discovery.refresh();
    }

    /// Number of cached singletons (meta and format)
    pub fn cached_len(&self) -> usize {
        self.metas.borrow().len() + self.formats.borrow().len()
    }

    fn supported_entry(&self, category: Category, version: u32) -> Result<&VersionEntry> {
        self.discovery
            .catalog()
            .entry(version)
            .filter(|entry| entry.is_supported() && entry.formats.contains_key(&category))
            .ok_or_else(|| DatevError::format_not_supported(category, version))
    }
}
