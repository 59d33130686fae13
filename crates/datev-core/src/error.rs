//! Unified Error Model
use crate::category::Category;
use thiserror::Error;

/// Failures raised at the public API boundaries.
///
/// Per-version structural findings are never raised; they are collected as
/// [`crate::StructuralIssue`] records instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatevError {
    #[error("SCHEMA/NOT_SUPPORTED: {}", describe_target(.version, .category))]
    NotSupported {
        version: u32,
        category: Option<Category>,
    },

    #[error("VALUE/INVALID: field '{field}'{}: {reason}", describe_position(.position))]
    InvalidValue {
        field: String,
        position: Option<usize>,
        reason: String,
    },

    #[error("LAYOUT/{0}")]
    Definition(#[from] DefinitionError),
}

impl DatevError {
    pub fn version_not_supported(version: u32) -> Self {
        DatevError::NotSupported {
            version,
            category: None,
        }
    }

    pub fn format_not_supported(category: Category, version: u32) -> Self {
        DatevError::NotSupported {
            version,
            category: Some(category),
        }
    }

    pub fn unknown_field(field: impl Into<String>) -> Self {
        DatevError::InvalidValue {
            field: field.into(),
            position: None,
            reason: "unknown field".to_string(),
        }
    }

    pub fn invalid_value(field: impl Into<String>, position: usize, reason: impl Into<String>) -> Self {
        DatevError::InvalidValue {
            field: field.into(),
            position: Some(position),
            reason: reason.into(),
        }
    }

    pub fn is_not_supported(&self) -> bool {
        matches!(self, DatevError::NotSupported { .. })
    }

    pub fn is_invalid_value(&self) -> bool {
        matches!(self, DatevError::InvalidValue { .. })
    }
}

fn describe_target(version: &u32, category: &Option<Category>) -> String {
    match category {
        Some(category) => format!("format {} in version {}", category, version),
        None => format!("version {}", version),
    }
}

fn describe_position(position: &Option<usize>) -> String {
    position.map(|p| format!(" at position {}", p)).unwrap_or_default()
}

/// Problems found while building a definition from its layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("EMPTY: definition declares no fields")]
    Empty,

    #[error("DUPLICATE_NAME: field name '{0}' is used twice")]
    DuplicateName(String),

    #[error("POSITION: field '{name}' sits at position {found}, expected {expected}")]
    PositionGap {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("PATTERN: field '{name}' has an invalid pattern: {reason}")]
    InvalidPattern { name: String, reason: String },

    #[error("PARSE: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, DatevError>;
