//! Layout documents for version modules.
//!
//! A layout is a YAML document listing fields in column order. Positions
//! are implied by order; patterns and value quoting follow from the field
//! kind unless the field overrides them.
//!
//! ```yaml
//! category: account_labels
//! version: 700
//! fields:
//!   - { name: konto, label: "Konto", kind: number, max: 9, required: true }
//!   - { name: kontenbeschriftung, label: "Kontenbeschriftung", kind: text, max: 40 }
//! ```

use datev_core::{Category, DefinitionError, FieldDefinition, FormatDefinition, MetaDefinition};
use serde::Deserialize;

/// Value domain of a field; decides the default pattern and quoting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text, enclosed
    Text,
    /// Short enclosed code; usually carries an explicit pattern
    Code,
    /// Unsigned amount with decimal comma
    Amount,
    /// Digits only
    Number,
    /// Decimal comma value (rates, quantities)
    Decimal,
    /// Day and month, TTMM
    Date4,
    /// Full date, TTMMJJJJ
    Date8,
    /// 0 or 1
    Flag,
}

impl FieldKind {
    fn pattern(&self, max: Option<usize>) -> String {
        match self {
            FieldKind::Text => format!(r"[^\r\n]{{0,{}}}", max.unwrap_or(255)),
            FieldKind::Code => format!(r"[^\r\n]{{1,{}}}", max.unwrap_or(4)),
            FieldKind::Amount => r"\d{1,10}(,\d{1,2})?".to_string(),
            FieldKind::Number => format!(r"\d{{1,{}}}", max.unwrap_or(10)),
            FieldKind::Decimal => r"\d{1,8}(,\d{1,6})?".to_string(),
            FieldKind::Date4 => r"(0[1-9]|[12]\d|3[01])(0[1-9]|1[0-2])".to_string(),
            FieldKind::Date8 => r"(0[1-9]|[12]\d|3[01])(0[1-9]|1[0-2])\d{4}".to_string(),
            FieldKind::Flag => "[01]".to_string(),
        }
    }

    fn quoted(&self) -> bool {
        matches!(self, FieldKind::Text | FieldKind::Code)
    }
}

#[derive(Debug, Deserialize)]
struct FieldEntry {
    name: String,
    label: String,
    kind: FieldKind,
    #[serde(default)]
    max: Option<usize>,
    #[serde(default)]
    pattern: Option<String>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    quote_header: Option<bool>,
    #[serde(default)]
    default: Option<String>,
}

impl FieldEntry {
    fn build(&self, position: usize, quote_labels: bool) -> FieldDefinition {
        FieldDefinition {
            name: self.name.clone(),
            label: self.label.clone(),
            position,
            pattern: Some(
                self.pattern
                    .clone()
                    .unwrap_or_else(|| self.kind.pattern(self.max)),
            ),
            required: self.required,
            quote_header: self.quote_header.unwrap_or(quote_labels),
            quote_value: self.kind.quoted(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FormatLayout {
    category: Category,
    version: u32,
    #[serde(default)]
    quote_labels: bool,
    fields: Vec<FieldEntry>,
}

#[derive(Debug, Deserialize)]
struct MetaLayout {
    version: u32,
    declared_fields: usize,
    #[serde(default)]
    quote_labels: bool,
    fields: Vec<FieldEntry>,
}

/// Parse a format layout document into a checked definition
pub fn format_from_yaml(source: &str) -> Result<FormatDefinition, DefinitionError> {
    let layout: FormatLayout = serde_yaml::from_str(source)
        .map_err(|e| DefinitionError::Parse(format!("format layout: {}", e)))?;

    let fields = layout
        .fields
        .iter()
        .enumerate()
        .map(|(i, entry)| entry.build(i + 1, layout.quote_labels))
        .collect();

    FormatDefinition::new(layout.category, layout.version, fields)
}

/// Parse a preamble layout document; consistency is left to the caller
pub fn meta_from_yaml(source: &str) -> Result<MetaDefinition, DefinitionError> {
    let layout: MetaLayout = serde_yaml::from_str(source)
        .map_err(|e| DefinitionError::Parse(format!("meta layout: {}", e)))?;

    let fields = layout
        .fields
        .iter()
        .enumerate()
        .map(|(i, entry)| entry.build(i + 1, layout.quote_labels))
        .collect();

    let meta = MetaDefinition::new(layout.version, layout.declared_fields, fields);
    Ok(layout
        .fields
        .iter()
        .filter_map(|entry| entry.default.as_ref().map(|d| (entry.name.clone(), d.clone())))
        .fold(meta, |meta, (name, value)| meta.with_default(name, value)))
}
