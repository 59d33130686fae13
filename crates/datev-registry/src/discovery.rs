//! Version discovery
//!
//! Walks the registration table once, resolves every version module in
//! isolation and keeps the result as an immutable [`Catalog`] until the
//! next explicit refresh. A broken module only ever produces
//! [`StructuralIssue`]s for its own version.

use datev_core::{
    Category, FormatFactory, IssueKind, MetaFactory, RegistrationTable, StructuralIssue, VersionModule,
};
use once_cell::unsync::OnceCell;
use serde::Serialize;
use std::cell::Cell;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// A resolved format of one version
#[derive(Debug, Clone, Serialize)]
pub struct FormatHandle {
    pub category: Category,
    pub field_count: usize,
    #[serde(skip)]
    factory: FormatFactory,
}

impl FormatHandle {
    pub(crate) fn factory(&self) -> FormatFactory {
        self.factory
    }
}

/// Discovery result for one version
#[derive(Debug, Clone, Serialize)]
pub struct VersionEntry {
    pub version: u32,

    /// Registration path of the version module
    pub path: String,

    /// Meta factory built a definition reporting this version
    pub meta_resolved: bool,

    /// Field count of the built meta definition, consistent or not
    pub meta_field_count: Option<usize>,

    pub formats: BTreeMap<Category, FormatHandle>,

    pub issues: Vec<StructuralIssue>,

    /// Present only when the meta definition resolved and is consistent
    #[serde(skip)]
    meta: Option<MetaFactory>,
}

impl VersionEntry {
    pub fn is_supported(&self) -> bool {
        self.meta.is_some()
    }

    pub(crate) fn meta_factory(&self) -> Option<MetaFactory> {
        self.meta
    }

    /// Categories resolved in this version, regardless of support
    pub fn categories(&self) -> Vec<Category> {
        self.formats.keys().copied().collect()
    }

    fn resolve(module: &VersionModule) -> Self {
        let version = module.version();
        let mut entry = VersionEntry {
            version,
            path: module.path().to_string(),
            meta_resolved: false,
            meta_field_count: None,
            formats: BTreeMap::new(),
            issues: Vec::new(),
            meta: None,
        };

        entry.resolve_meta(module.meta_factory());
        for factory in module.format_factories() {
            entry.resolve_format(*factory);
        }

        debug!(
            version,
            supported = entry.is_supported(),
            formats = entry.formats.len(),
            issues = entry.issues.len(),
            "version resolved"
        );
        entry
    }

    fn resolve_meta(&mut self, factory: Option<MetaFactory>) {
        let Some(factory) = factory else {
            self.issues.push(StructuralIssue::new(
                self.version,
                IssueKind::MetaMissing,
                "no meta definition registered",
            ));
            return;
        };

        let meta = match factory() {
            Ok(meta) => meta,
            Err(e) => {
                self.issues.push(StructuralIssue::new(
                    self.version,
                    IssueKind::MetaFailed,
                    e.to_string(),
                ));
                return;
            }
        };

        if meta.version() != self.version {
            self.issues.push(StructuralIssue::new(
                self.version,
                IssueKind::VersionMismatch,
                format!("meta definition reports version {}", meta.version()),
            ));
            return;
        }

        self.meta_resolved = true;
        self.meta_field_count = Some(meta.get_fields().len());

        let problems = meta.consistency_problems();
        if problems.is_empty() {
            self.meta = Some(factory);
        } else {
            self.issues.extend(
                problems
                    .into_iter()
                    .map(|p| StructuralIssue::new(self.version, IssueKind::MetaInconsistent, p)),
            );
        }
    }

    fn resolve_format(&mut self, factory: FormatFactory) {
        let definition = match factory() {
            Ok(definition) => definition,
            Err(e) => {
                self.issues.push(StructuralIssue::new(
                    self.version,
                    IssueKind::FormatFailed,
                    e.to_string(),
                ));
                return;
            }
        };

        let category = definition.category();
        if definition.version() != self.version {
            self.issues.push(
                StructuralIssue::new(
                    self.version,
                    IssueKind::VersionMismatch,
                    format!("format definition reports version {}", definition.version()),
                )
                .with_category(category),
            );
            return;
        }

        if self.formats.contains_key(&category) {
            self.issues.push(
                StructuralIssue::new(
                    self.version,
                    IssueKind::DuplicateCategory,
                    "category registered by more than one factory, keeping the first",
                )
                .with_category(category),
            );
            return;
        }

        self.formats.insert(
            category,
            FormatHandle {
                category,
                field_count: definition.field_count(),
                factory,
            },
        );
    }
}

/// Immutable snapshot of every discovered version
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    versions: BTreeMap<u32, VersionEntry>,
}

impl Catalog {
    pub fn scan(table: &RegistrationTable) -> Self {
        let versions: BTreeMap<u32, VersionEntry> = table
            .modules()
            .map(|module| (module.version(), VersionEntry::resolve(module)))
            .collect();

        for issue in versions.values().flat_map(|e| e.issues.iter()) {
            warn!(version = issue.version, kind = ?issue.kind, "{}", issue.message);
        }

        let catalog = Self { versions };
        info!(
            available = catalog.versions.len(),
            supported = catalog.supported_versions().len(),
            "format catalog discovered"
        );
        catalog
    }

    pub fn entry(&self, version: u32) -> Option<&VersionEntry> {
        self.versions.get(&version)
    }

    pub fn entries(&self) -> impl Iterator<Item = &VersionEntry> {
        self.versions.values()
    }

    pub fn available_versions(&self) -> Vec<u32> {
        self.versions.keys().copied().collect()
    }

    pub fn supported_versions(&self) -> Vec<u32> {
        self.versions
            .values()
            .filter(|e| e.is_supported())
            .map(|e| e.version)
            .collect()
    }

    pub fn issues(&self) -> impl Iterator<Item = &StructuralIssue> {
        self.versions.values().flat_map(|e| e.issues.iter())
    }
}

/// Diagnostics for one version, as reported by [`Discovery::get_version_details`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionDetails {
    pub path: String,
    pub meta_resolved: bool,
    pub supported: bool,
    /// Category → handle name
    pub formats: BTreeMap<Category, String>,
    pub format_count: usize,
    pub issues: Vec<StructuralIssue>,
}

/// Lazily populated catalog over a registration table.
///
/// The catalog is built on first access and kept until [`Discovery::refresh`]
/// or a forced [`Discovery::discover`]. Not thread-safe; share it read-only
/// after discovery or serialize access.
#[derive(Debug)]
pub struct Discovery {
    table: RegistrationTable,
    catalog: OnceCell<Catalog>,
    scans: Cell<usize>,
}

impl Discovery {
    pub fn new(table: RegistrationTable) -> Self {
        Self {
            table,
            catalog: OnceCell::new(),
            scans: Cell::new(0),
        }
    }

    /// Populates the catalog; a no-op when already populated unless `force`
    pub fn discover(&mut self, force: bool) -> &Catalog {
        if force {
            self.catalog.take();
        }
        self.catalog()
    }

    pub fn refresh(&mut self) -> &Catalog {
        self.discover(true)
    }

    /// The current catalog, scanning on first access
    pub fn catalog(&self) -> &Catalog {
        self.catalog.get_or_init(|| {
            self.scans.set(self.scans.get() + 1);
            Catalog::scan(&self.table)
        })
    }

    pub fn is_discovered(&self) -> bool {
        self.catalog.get().is_some()
    }

    /// How many scans this instance has performed
    pub fn scan_count(&self) -> usize {
        self.scans.get()
    }

    /// Every version with a registered module, valid or not
    pub fn get_available_versions(&self) -> Vec<u32> {
        self.catalog().available_versions()
    }

    /// Versions whose meta definition resolved and is consistent
    pub fn get_supported_versions(&self) -> Vec<u32> {
        self.catalog().supported_versions()
    }

    pub fn is_version_supported(&self, version: u32) -> bool {
        self.catalog()
            .entry(version)
            .map(VersionEntry::is_supported)
            .unwrap_or(false)
    }

    pub fn is_format_supported(&self, category: Category, version: u32) -> bool {
        self.catalog()
            .entry(version)
            .map(|e| e.is_supported() && e.formats.contains_key(&category))
            .unwrap_or(false)
    }

    /// Categories available in a supported version; empty otherwise
    pub fn get_supported_formats(&self, version: u32) -> Vec<Category> {
        match self.catalog().entry(version) {
            Some(entry) if entry.is_supported() => entry.categories(),
            _ => Vec::new(),
        }
    }

    pub fn get_version_details(&self) -> BTreeMap<u32, VersionDetails> {
        self.catalog()
            .entries()
            .map(|entry| {
                let formats = entry
                    .formats
                    .keys()
                    .map(|c| (*c, format!("{}::{}", entry.path, c)))
                    .collect::<BTreeMap<_, _>>();
                let details = VersionDetails {
                    path: entry.path.clone(),
                    meta_resolved: entry.meta_resolved,
                    supported: entry.is_supported(),
                    format_count: formats.len(),
                    formats,
                    issues: entry.issues.clone(),
                };
                (entry.version, details)
            })
            .collect()
    }
}
