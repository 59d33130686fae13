//! Meta preamble rendering
use crate::options::LineOptions;
use crate::tokenizer::{enclose, fits_unquoted};
use datev_core::{DatevError, MetaDefinition, Result};
use std::collections::HashMap;

/// Writes the preamble line of `meta`.
///
/// Each field takes its override, else its default, else stays empty.
/// Non-empty values are enclosed when the field quotes values.
pub fn render_preamble<I, K, V>(meta: &MetaDefinition, overrides: I, options: &LineOptions) -> Result<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut values = HashMap::new();
    for (name, value) in overrides {
        let name = name.as_ref();
        if meta.field(name).is_none() {
            return Err(DatevError::unknown_field(name));
        }
        values.insert(name.to_string(), value.as_ref().to_string());
    }

    let mut fields: Vec<_> = meta.get_fields().iter().collect();
    fields.sort_by_key(|f| f.position);

    let mut cells = Vec::with_capacity(fields.len());
    for field in fields {
        let value = values
            .get(&field.name)
            .map(String::as_str)
            .or_else(|| meta.default_value(&field.name))
            .unwrap_or("");
        let cell = if value.is_empty() {
            String::new()
        } else if field.quote_value {
            enclose(value, options.enclosure())
        } else if !fits_unquoted(value, options.delimiter(), options.enclosure()) {
            return Err(DatevError::invalid_value(
                &field.name,
                field.position,
                "unquoted value would not read back as one cell",
            ));
        } else {
            value.to_string()
        };
        cells.push(cell);
    }

    Ok(cells.join(&options.delimiter().to_string()))
}
