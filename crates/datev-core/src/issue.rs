//! Structural issues recorded during discovery and validation

use crate::category::Category;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Version module registered no meta definition
    MetaMissing,
    /// Meta factory returned an error
    MetaFailed,
    /// Meta definition built but is internally inconsistent
    MetaInconsistent,
    /// Format factory returned an error
    FormatFailed,
    /// Definition reports a version other than its module's
    VersionMismatch,
    /// Two format factories report the same category
    DuplicateCategory,
}

/// A per-version finding. Recorded, never raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralIssue {
    pub version: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    pub kind: IssueKind,

    pub message: String,
}

impl StructuralIssue {
    pub fn new(version: u32, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            version,
            category: None,
            kind,
            message: message.into(),
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }
}

impl fmt::Display for StructuralIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category {
            Some(category) => write!(f, "[{}/{}] {:?}: {}", self.version, category, self.kind, self.message),
            None => write!(f, "[{}] {:?}: {}", self.version, self.kind, self.message),
        }
    }
}
