//! Field definition: one column of a layout

use serde::{Deserialize, Serialize};

/// Schema metadata of a single field.
///
/// Built once when a version is resolved and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Stable key used by callers (snake_case)
    pub name: String,

    /// Label written in the header row
    pub label: String,

    /// 1-based column position
    pub position: usize,

    /// Regular expression a value must match as a whole
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(default)]
    pub required: bool,

    /// Whether the label is enclosed in the header row
    #[serde(default)]
    pub quote_header: bool,

    /// Whether values are enclosed by default
    #[serde(default)]
    pub quote_value: bool,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, label: impl Into<String>, position: usize) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            position,
            pattern: None,
            required: false,
            quote_header: false,
            quote_value: false,
        }
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn quoted_header(mut self) -> Self {
        self.quote_header = true;
        self
    }

    pub fn quoted_value(mut self) -> Self {
        self.quote_value = true;
        self
    }

    pub fn header_name(&self) -> &str {
        &self.label
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_quoted_header(&self) -> bool {
        self.quote_header
    }

    pub fn is_quoted_value(&self) -> bool {
        self.quote_value
    }
}
