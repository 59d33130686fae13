//! DATEV Core: schema records, error model and version registration
//!
//! Everything the other crates agree on lives here: the closed set of
//! document categories, the immutable field/format/meta records built once
//! per version, and the static registration table version modules fill in.
//!
//! ```text
//! version module ──register()──▶ RegistrationTable ──▶ discovery ──▶ registry
//!                                        │
//!                       MetaFactory / FormatFactory (fn pointers)
//! ```

pub mod category;
pub mod error;
pub mod field;
pub mod format;
pub mod issue;
pub mod meta;
pub mod registration;

pub use category::Category;
pub use error::{DatevError, DefinitionError, Result};
pub use field::FieldDefinition;
pub use format::FormatDefinition;
pub use issue::{IssueKind, StructuralIssue};
pub use meta::MetaDefinition;
pub use registration::{FormatFactory, MetaFactory, RegistrationTable, VersionModule};
