//! Format definition: the ordered field layout of one (category, version)

use crate::category::Category;
use crate::error::{DatevError, DefinitionError, Result};
use crate::field::FieldDefinition;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;

/// Ordered field layout for one category in one version.
///
/// Positions are contiguous `1..=N` in list order and names are unique;
/// [`FormatDefinition::new`] refuses anything else.
#[derive(Debug, Clone, Serialize)]
pub struct FormatDefinition {
    category: Category,
    version: u32,
    fields: Vec<FieldDefinition>,
    #[serde(skip)]
    patterns: Vec<Option<Regex>>,
}

impl FormatDefinition {
    pub fn new(
        category: Category,
        version: u32,
        fields: Vec<FieldDefinition>,
    ) -> std::result::Result<Self, DefinitionError> {
        if fields.is_empty() {
            return Err(DefinitionError::Empty);
        }

        let mut names = HashSet::new();
        let mut patterns = Vec::with_capacity(fields.len());

        for (index, field) in fields.iter().enumerate() {
            if !names.insert(field.name.as_str()) {
                return Err(DefinitionError::DuplicateName(field.name.clone()));
            }
            if field.position != index + 1 {
                return Err(DefinitionError::PositionGap {
                    name: field.name.clone(),
                    expected: index + 1,
                    found: field.position,
                });
            }
            patterns.push(compile_pattern(field)?);
        }

        Ok(Self {
            category,
            version,
            fields,
            patterns,
        })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Fields in position order
    pub fn ordered(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Fields that must carry a value
    pub fn required(&self) -> Vec<&FieldDefinition> {
        self.fields.iter().filter(|f| f.required).collect()
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_at(&self, position: usize) -> Option<&FieldDefinition> {
        position.checked_sub(1).and_then(|i| self.fields.get(i))
    }

    /// Header labels in position order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.label.as_str())
    }

    pub fn is_valid_field_value(&self, name: &str, raw: &str) -> bool {
        self.check_value(name, raw).is_ok()
    }

    /// Validates `raw` against the named field and returns the field on success.
    ///
    /// Empty values are accepted for optional fields regardless of pattern.
    /// For required fields the pattern decides; a required field without a
    /// pattern must not be empty.
    pub fn check_value(&self, name: &str, raw: &str) -> Result<&FieldDefinition> {
        let index = self
            .fields
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| DatevError::unknown_field(name))?;
        let field = &self.fields[index];

        if raw.is_empty() && !field.required {
            return Ok(field);
        }

        match &self.patterns[index] {
            None if raw.is_empty() => {
                return Err(DatevError::invalid_value(
                    name,
                    field.position,
                    "required field is empty",
                ));
            }
            None => {}
            Some(regex) if !regex.is_match(raw) => {
                return Err(DatevError::invalid_value(
                    name,
                    field.position,
                    format!(
                        "value '{}' does not match pattern '{}'",
                        raw,
                        field.pattern.as_deref().unwrap_or_default()
                    ),
                ));
            }
            Some(_) => {}
        }

        Ok(field)
    }
}

impl PartialEq for FormatDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.category == other.category && self.version == other.version && self.fields == other.fields
    }
}

impl Eq for FormatDefinition {}

impl AsRef<FormatDefinition> for FormatDefinition {
    fn as_ref(&self) -> &FormatDefinition {
        self
    }
}

fn compile_pattern(field: &FieldDefinition) -> std::result::Result<Option<Regex>, DefinitionError> {
    match &field.pattern {
        None => Ok(None),
        Some(pattern) => Regex::new(&format!("^(?:{})$", pattern))
            .map(Some)
            .map_err(|e| DefinitionError::InvalidPattern {
                name: field.name.clone(),
                reason: e.to_string(),
            }),
    }
}
