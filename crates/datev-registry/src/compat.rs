//! Compatibility Matrix
use crate::discovery::Discovery;
use datev_core::Category;
use serde::Serialize;
use std::collections::BTreeMap;

/// Category × version availability, with every combination present.
///
/// Unsupported combinations are stored as explicit `false` cells; a missing
/// cell means the category or version is outside the discovered catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CompatMatrix {
    cells: BTreeMap<Category, BTreeMap<u32, bool>>,
}

impl CompatMatrix {
    pub fn build(discovery: &Discovery) -> Self {
        let versions = discovery.get_available_versions();
        let cells = Category::all()
            .iter()
            .map(|category| {
                let row = versions
                    .iter()
                    .map(|v| (*v, discovery.is_format_supported(*category, *v)))
                    .collect();
                (*category, row)
            })
            .collect();
        Self { cells }
    }

    /// Explicit cell value, `None` only outside the catalog
    pub fn cell(&self, category: Category, version: u32) -> Option<bool> {
        self.cells.get(&category).and_then(|row| row.get(&version)).copied()
    }

    pub fn is_compatible(&self, category: Category, version: u32) -> bool {
        self.cell(category, version).unwrap_or(false)
    }

    pub fn row(&self, category: Category) -> Option<&BTreeMap<u32, bool>> {
        self.cells.get(&category)
    }

    /// Versions offering `category`, ascending
    pub fn versions_for(&self, category: Category) -> Vec<u32> {
        self.row(category)
            .map(|row| row.iter().filter(|(_, ok)| **ok).map(|(v, _)| *v).collect())
            .unwrap_or_default()
    }
}
