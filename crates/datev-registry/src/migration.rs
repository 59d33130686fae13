//! Migration plans between versions
use datev_core::{Category, FormatDefinition};
use serde::Serialize;
use std::collections::HashMap;

/// Which categories survive a move from one version to another
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationPlan {
    pub from: u32,
    pub to: u32,
    /// Supported in both versions
    pub migratable: Vec<Category>,
    /// Supported in `from` only
    pub not_migratable: Vec<Category>,
    /// Supported in `to` only
    pub new_formats: Vec<Category>,
}

impl MigrationPlan {
    pub fn between(from: u32, from_formats: &[Category], to: u32, to_formats: &[Category]) -> Self {
        let mut migratable: Vec<Category> = from_formats
            .iter()
            .filter(|c| to_formats.contains(c))
            .copied()
            .collect();
        let mut not_migratable: Vec<Category> = from_formats
            .iter()
            .filter(|c| !to_formats.contains(c))
            .copied()
            .collect();
        let mut new_formats: Vec<Category> = to_formats
            .iter()
            .filter(|c| !from_formats.contains(c))
            .copied()
            .collect();

        migratable.sort();
        not_migratable.sort();
        new_formats.sort();

        Self {
            from,
            to,
            migratable,
            not_migratable,
            new_formats,
        }
    }

    /// No category is lost by the move
    pub fn is_lossless(&self) -> bool {
        self.not_migratable.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMove {
    pub name: String,
    pub from_position: usize,
    pub to_position: usize,
}

/// Field-level differences of one category between two versions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDiff {
    pub category: Category,
    pub from: u32,
    pub to: u32,
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub moved: Vec<FieldMove>,
}

impl FieldDiff {
    pub fn between(from: &FormatDefinition, to: &FormatDefinition) -> Self {
        let old: HashMap<&str, usize> = from
            .ordered()
            .iter()
            .map(|f| (f.name.as_str(), f.position))
            .collect();
        let new: HashMap<&str, usize> = to
            .ordered()
            .iter()
            .map(|f| (f.name.as_str(), f.position))
            .collect();

        let added = to
            .ordered()
            .iter()
            .filter(|f| !old.contains_key(f.name.as_str()))
            .map(|f| f.name.clone())
            .collect();
        let removed = from
            .ordered()
            .iter()
            .filter(|f| !new.contains_key(f.name.as_str()))
            .map(|f| f.name.clone())
            .collect();
        let moved = from
            .ordered()
            .iter()
            .filter_map(|f| {
                new.get(f.name.as_str())
                    .filter(|p| **p != f.position)
                    .map(|p| FieldMove {
                        name: f.name.clone(),
                        from_position: f.position,
                        to_position: *p,
                    })
            })
            .collect();

        Self {
            category: to.category(),
            from: from.version(),
            to: to.version(),
            added,
            removed,
            moved,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.moved.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datev_core::FieldDefinition;

    #[test]
    fn test_plan_partitions_categories() {
        let plan = MigrationPlan::between(
            510,
            &[Category::BookingBatch, Category::AccountLabels],
            700,
            &[Category::AccountLabels, Category::PaymentTerms, Category::BookingBatch],
        );
        assert_eq!(plan.migratable, vec![Category::BookingBatch, Category::AccountLabels]);
        assert!(plan.not_migratable.is_empty());
        assert_eq!(plan.new_formats, vec![Category::PaymentTerms]);
        assert!(plan.is_lossless());
    }

    #[test]
    fn test_field_diff() {
        let from = FormatDefinition::new(
            Category::AccountLabels,
            1,
            vec![
                FieldDefinition::new("konto", "Konto", 1),
                FieldDefinition::new("alt", "Alt", 2),
                FieldDefinition::new("text", "Text", 3),
            ],
        )
        .unwrap();
        let to = FormatDefinition::new(
            Category::AccountLabels,
            2,
            vec![
                FieldDefinition::new("konto", "Konto", 1),
                FieldDefinition::new("text", "Text", 2),
                FieldDefinition::new("neu", "Neu", 3),
            ],
        )
        .unwrap();

        let diff = FieldDiff::between(&from, &to);
        assert_eq!(diff.added, vec!["neu".to_string()]);
        assert_eq!(diff.removed, vec!["alt".to_string()]);
        assert_eq!(
            diff.moved,
            vec![FieldMove {
                name: "text".to_string(),
                from_position: 3,
                to_position: 2
            }]
        );
        assert!(!diff.is_empty());
        assert!(FieldDiff::between(&to, &to).is_empty());
    }
}
