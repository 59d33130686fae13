//! Version 510 module: legacy generation, booking batch and account labels only.
use crate::layout::{format_from_yaml, meta_from_yaml};
use datev_core::{DefinitionError, FormatDefinition, MetaDefinition, RegistrationTable};

pub const VERSION: u32 = 510;

/// Layout documents of this version, for callers assembling their own tables
pub const META: &str = include_str!("../layouts/v510/meta.yaml");
pub const BOOKING_BATCH: &str = include_str!("../layouts/v510/booking_batch.yaml");
pub const ACCOUNT_LABELS: &str = include_str!("../layouts/v510/account_labels.yaml");

pub fn register(table: &mut RegistrationTable) {
    table
        .version(VERSION, module_path!())
        .meta(meta)
        .format(booking_batch)
        .format(account_labels);
}

fn meta() -> Result<MetaDefinition, DefinitionError> {
    meta_from_yaml(META)
}

fn booking_batch() -> Result<FormatDefinition, DefinitionError> {
    format_from_yaml(BOOKING_BATCH)
}

fn account_labels() -> Result<FormatDefinition, DefinitionError> {
    format_from_yaml(ACCOUNT_LABELS)
}
