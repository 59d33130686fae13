//! Format Manager: cross-version analysis over a registry
//!
//! Pure derivations; nothing here mutates the catalog or raises on
//! structural findings. Reports are meant for logging and dashboards.

use crate::compat::CompatMatrix;
use crate::migration::{FieldDiff, MigrationPlan};
use crate::registry::Registry;
use datev_core::{Category, Result, StructuralIssue};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatSize {
    pub category: Category,
    pub field_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionOverview {
    pub supported: bool,
    pub formats: Vec<FormatSize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionValidation {
    pub valid: bool,
    /// Categories of the family without a resolved definition
    pub missing: Vec<Category>,
    pub issues: Vec<StructuralIssue>,
}

/// Serializable form of [`Manager::get_version_summary`]
#[derive(Debug, Clone, Serialize)]
pub struct VersionSummary {
    pub available: Vec<u32>,
    pub supported: Vec<u32>,
    pub overview: BTreeMap<u32, VersionOverview>,
    pub validation: BTreeMap<u32, VersionValidation>,
    pub best_versions: BTreeMap<Category, Option<u32>>,
}

pub struct Manager<'r> {
    registry: &'r Registry,
}

impl<'r> Manager<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn get_version_overview(&self) -> BTreeMap<u32, VersionOverview> {
        self.registry
            .discovery()
            .catalog()
            .entries()
            .map(|entry| {
                let formats = entry
                    .formats
                    .values()
                    .map(|handle| FormatSize {
                        category: handle.category,
                        field_count: handle.field_count,
                    })
                    .collect();
                (
                    entry.version,
                    VersionOverview {
                        supported: entry.is_supported(),
                        formats,
                    },
                )
            })
            .collect()
    }

    pub fn get_compatibility_matrix(&self) -> CompatMatrix {
        CompatMatrix::build(self.registry.discovery())
    }

    /// Highest supported version offering `category`
    pub fn get_best_version_for_format(&self, category: Category) -> Option<u32> {
        self.registry
            .get_supported_versions()
            .into_iter()
            .filter(|v| self.is_available(category, *v))
            .max()
    }

    pub fn is_available(&self, category: Category, version: u32) -> bool {
        self.registry.discovery().is_format_supported(category, version)
    }

    pub fn get_migration_plan(&self, from: u32, to: u32) -> MigrationPlan {
        let discovery = self.registry.discovery();
        MigrationPlan::between(
            from,
            &discovery.get_supported_formats(from),
            to,
            &discovery.get_supported_formats(to),
        )
    }

    /// Field-level changes of one category; both ends must be supported
    pub fn get_field_diff(&self, category: Category, from: u32, to: u32) -> Result<FieldDiff> {
        let old = self.registry.get_format_definition(category, from)?;
        let new = self.registry.get_format_definition(category, to)?;
        Ok(FieldDiff::between(&old, &new))
    }

    /// One entry per available version, supported or not
    pub fn validate_all_versions(&self) -> BTreeMap<u32, VersionValidation> {
        self.registry
            .discovery()
            .catalog()
            .entries()
            .map(|entry| {
                let missing: Vec<Category> = Category::all()
                    .iter()
                    .filter(|c| !entry.formats.contains_key(c))
                    .copied()
                    .collect();
                let valid = entry.is_supported() && entry.issues.is_empty() && !entry.formats.is_empty();
                (
                    entry.version,
                    VersionValidation {
                        valid,
                        missing,
                        issues: entry.issues.clone(),
                    },
                )
            })
            .collect()
    }

    pub fn summary_report(&self) -> VersionSummary {
        VersionSummary {
            available: self.registry.get_available_versions(),
            supported: self.registry.get_supported_versions(),
            overview: self.get_version_overview(),
            validation: self.validate_all_versions(),
            best_versions: Category::all()
                .iter()
                .map(|c| (*c, self.get_best_version_for_format(*c)))
                .collect(),
        }
    }

    /// Human-readable diagnostic report
    pub fn get_version_summary(&self) -> String {
        let report = self.summary_report();
        let details = self.registry.discovery().get_version_details();
        let catalog = self.registry.discovery().catalog();
        let mut lines = vec![
            "DATEV format catalog".to_string(),
            format!("  available versions: {}", join(&report.available)),
            format!("  supported versions: {}", join(&report.supported)),
        ];

        for (version, overview) in &report.overview {
            let validation = &report.validation[version];
            lines.push(String::new());
            lines.push(format!(
                "Version {} [{}, {}]",
                version,
                if overview.supported { "supported" } else { "unsupported" },
                if validation.valid { "valid" } else { "invalid" },
            ));
            if let Some(detail) = details.get(version) {
                lines.push(format!("  path: {}", detail.path));
            }
            if let Some(count) = catalog.entry(*version).and_then(|e| e.meta_field_count) {
                lines.push(format!("  meta fields: {}", count));
            }
            for format in &overview.formats {
                lines.push(format!("  {}: {} fields", format.category, format.field_count));
            }
            if !validation.missing.is_empty() {
                lines.push(format!("  missing: {}", join(&validation.missing)));
            }
            for issue in &validation.issues {
                lines.push(format!("  issue: {}", issue));
            }
        }

        lines.push(String::new());
        lines.push("Best versions:".to_string());
        for (category, best) in &report.best_versions {
            let best = best.map(|v| v.to_string()).unwrap_or_else(|| "none".to_string());
            lines.push(format!("  {}: {}", category, best));
        }

        lines.join("\n") + "\n"
    }
}

fn join<T: ToString>(items: &[T]) -> String {
    if items.is_empty() {
        return "none".to_string();
    }
    items.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_overview() {
        let registry = Registry::builtin();
        let manager = Manager::new(&registry);
        let overview = manager.get_version_overview();

        assert_eq!(overview.len(), 2);
        assert!(overview[&700].supported);
        assert_eq!(overview[&700].formats.len(), 4);
        assert_eq!(
            overview[&510].formats[0],
            FormatSize {
                category: Category::BookingBatch,
                field_count: 116
            }
        );
    }

    #[test]
    fn test_best_version() {
        let registry = Registry::builtin();
        let manager = Manager::new(&registry);
        assert_eq!(manager.get_best_version_for_format(Category::BookingBatch), Some(700));
        assert_eq!(manager.get_best_version_for_format(Category::DebtorsCreditors), Some(700));
    }

    #[test]
    fn test_field_diff_between_generations() {
        let registry = Registry::builtin();
        let manager = Manager::new(&registry);
        let diff = manager.get_field_diff(Category::BookingBatch, 510, 700).unwrap();
        assert_eq!(diff.added.len(), 9);
        assert_eq!(diff.added[0], "faelligkeit");
        assert!(diff.removed.is_empty());
        assert!(diff.moved.is_empty());

        assert!(manager
            .get_field_diff(Category::PaymentTerms, 510, 700)
            .unwrap_err()
            .is_not_supported());
    }

    #[test]
    fn test_summary_text() {
        let registry = Registry::builtin();
        let summary = Manager::new(&registry).get_version_summary();
        assert!(summary.contains("supported versions: 510, 700"));
        assert!(summary.contains("Version 510 [supported, valid]"));
        assert!(summary.contains("missing: debtors_creditors, payment_terms"));
        assert!(summary.contains("booking_batch: 125 fields"));
        assert!(summary.contains("meta fields: 31"));
        assert!(summary.contains("meta fields: 26"));
    }

    #[test]
    fn test_reports_leave_cache_untouched() {
        let registry = Registry::builtin();
        let manager = Manager::new(&registry);
        manager.get_version_summary();
        manager.summary_report();
        manager.get_migration_plan(510, 700);
        assert_eq!(registry.cached_len(), 0);
    }
}
