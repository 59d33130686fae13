//! Version 700 module: current generation layouts.
use crate::layout::{format_from_yaml, meta_from_yaml};
use datev_core::{DefinitionError, FormatDefinition, MetaDefinition, RegistrationTable};

pub const VERSION: u32 = 700;

/// Layout documents of this version, for callers assembling their own tables
pub const META: &str = include_str!("../layouts/v700/meta.yaml");
pub const BOOKING_BATCH: &str = include_str!("../layouts/v700/booking_batch.yaml");
pub const DEBTORS_CREDITORS: &str = include_str!("../layouts/v700/debtors_creditors.yaml");
pub const ACCOUNT_LABELS: &str = include_str!("../layouts/v700/account_labels.yaml");
pub const PAYMENT_TERMS: &str = include_str!("../layouts/v700/payment_terms.yaml");

pub fn register(table: &mut RegistrationTable) {
    table
        .version(VERSION, module_path!())
        .meta(meta)
        .format(booking_batch)
        .format(debtors_creditors)
        .format(account_labels)
        .format(payment_terms);
}

fn meta() -> Result<MetaDefinition, DefinitionError> {
    meta_from_yaml(META)
}

fn booking_batch() -> Result<FormatDefinition, DefinitionError> {
    format_from_yaml(BOOKING_BATCH)
}

fn debtors_creditors() -> Result<FormatDefinition, DefinitionError> {
    format_from_yaml(DEBTORS_CREDITORS)
}

fn account_labels() -> Result<FormatDefinition, DefinitionError> {
    format_from_yaml(ACCOUNT_LABELS)
}

fn payment_terms() -> Result<FormatDefinition, DefinitionError> {
    format_from_yaml(PAYMENT_TERMS)
}
