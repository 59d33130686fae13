//! Meta definition: the fixed preamble field set of one version

use crate::field::FieldDefinition;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Preamble layout of one version generation, with per-field defaults.
///
/// The declared field count is kept apart from the field list so that a
/// malformed layout can still be constructed and then reported by
/// [`MetaDefinition::consistency_problems`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaDefinition {
    version: u32,
    declared_fields: usize,
    fields: Vec<FieldDefinition>,
    defaults: BTreeMap<String, String>,
}

impl MetaDefinition {
    pub fn new(version: u32, declared_fields: usize, fields: Vec<FieldDefinition>) -> Self {
        Self {
            version,
            declared_fields,
            fields,
            defaults: BTreeMap::new(),
        }
    }

    pub fn with_default(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.insert(field.into(), value.into());
        self
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Declared number of preamble fields
    pub fn count_fields(&self) -> usize {
        self.declared_fields
    }

    pub fn get_fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Field lookup by name
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn default_value(&self, field: &str) -> Option<&str> {
        self.defaults.get(field).map(String::as_str)
    }

    /// Structural problems: declared count mismatch, duplicate positions or
    /// names, and defaults for fields that do not exist. Empty when sound.
    pub fn consistency_problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.fields.len() != self.declared_fields {
            problems.push(format!(
                "declares {} fields but defines {}",
                self.declared_fields,
                self.fields.len()
            ));
        }

        let mut positions = HashSet::new();
        let mut names = HashSet::new();
        for field in &self.fields {
            if !positions.insert(field.position) {
                problems.push(format!("duplicate position {} ('{}')", field.position, field.name));
            }
            if !names.insert(field.name.as_str()) {
                problems.push(format!("duplicate field name '{}'", field.name));
            }
        }

        for name in self.defaults.keys() {
            if !names.contains(name.as_str()) {
                problems.push(format!("default given for unknown field '{}'", name));
            }
        }

        problems
    }

    pub fn is_consistent(&self) -> bool {
        self.consistency_problems().is_empty()
    }
}
