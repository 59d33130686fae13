//! Built-in version modules
//!
//! One module per version generation. Each embeds its YAML layouts and
//! registers factories for them; [`builtin_table`] collects every module
//! shipped with the crate.

pub mod layout;
pub mod v510;
pub mod v700;

use datev_core::RegistrationTable;
use tracing::debug;

pub use layout::{format_from_yaml, meta_from_yaml, FieldKind};

/// Registration table with every shipped version module
pub fn builtin_table() -> RegistrationTable {
    let mut table = RegistrationTable::new();
    v510::register(&mut table);
    v700::register(&mut table);
    debug!(versions = table.len(), "built-in registration table assembled");
    table
}
