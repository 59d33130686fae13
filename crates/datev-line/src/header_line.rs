//! Header line codec bound to one format definition

use crate::detect::{detect_tokens, Detection};
use crate::options::LineOptions;
use crate::tokenizer::{fits_unquoted, split, Cell};
use datev_core::{DatevError, FieldDefinition, FormatDefinition, Result};
use std::fmt;
use std::sync::Arc;

/// One delimiter-separated line, addressed by field name.
///
/// Cells are stored serialized: a quoted cell keeps its enclosure, so
/// [`HeaderLine::get`] shows the quoting decision and [`HeaderLine::to_line`]
/// writes cells back unchanged.
#[derive(Debug, Clone)]
pub struct HeaderLine {
    definition: Arc<FormatDefinition>,
    options: LineOptions,
    cells: Vec<Option<Cell>>,
}

impl HeaderLine {
    /// Empty line with one unset cell per field
    pub fn new(definition: Arc<FormatDefinition>) -> Self {
        Self::with_options(definition, LineOptions::default())
    }

    pub fn with_options(definition: Arc<FormatDefinition>, options: LineOptions) -> Self {
        let cells = vec![None; definition.field_count()];
        Self {
            definition,
            options,
            cells,
        }
    }

    /// Label row of `definition`, each label quoted per its header rule
    pub fn labels(definition: Arc<FormatDefinition>, options: LineOptions) -> Self {
        let cells = definition
            .ordered()
            .iter()
            .map(|field| Some(Cell::new(&field.label, field.quote_header, options.enclosure())))
            .collect();
        Self {
            definition,
            options,
            cells,
        }
    }

    /// Ingests one physical line as-is.
    ///
    /// A trailing line terminator is dropped. Values are not checked against
    /// field patterns, and cells beyond the definition's width are kept so
    /// the line writes back unchanged.
    pub fn parse(definition: Arc<FormatDefinition>, raw: &str, options: LineOptions) -> Self {
        let line = raw.trim_end_matches(['\r', '\n']);
        let cells = split(line, options.delimiter(), options.enclosure())
            .into_iter()
            .map(Some)
            .collect();
        Self {
            definition,
            options,
            cells,
        }
    }

    /// Builds a line from name/value pairs, applying them in position order
    pub fn from_values<I, K, V>(definition: Arc<FormatDefinition>, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut ordered = values
            .into_iter()
            .map(|(name, value)| {
                let position = definition
                    .field(name.as_ref())
                    .map(FieldDefinition::position)
                    .ok_or_else(|| DatevError::unknown_field(name.as_ref()))?;
                Ok::<_, DatevError>((position, name, value))
            })
            .collect::<Result<Vec<_>>>()?;
        ordered.sort_by_key(|(position, _, _)| *position);

        let mut line = Self::new(definition);
        for (_, name, value) in ordered {
            line.set(name.as_ref(), value.as_ref())?;
        }
        Ok(line)
    }

    pub fn definition(&self) -> &Arc<FormatDefinition> {
        &self.definition
    }

    pub fn options(&self) -> &LineOptions {
        &self.options
    }

    /// Validates and stores `value`, quoting per the field's value rule
    pub fn set(&mut self, field: &str, value: &str) -> Result<()> {
        let quoted = self.definition.check_value(field, value)?.quote_value;
        self.store(field, value, quoted)
    }

    /// Like [`HeaderLine::set`], but quoting follows `was_quoted` instead of
    /// the field's rule
    pub fn set_with_quote_info(&mut self, field: &str, value: &str, was_quoted: bool) -> Result<()> {
        self.definition.check_value(field, value)?;
        self.store(field, value, was_quoted)
    }

    /// Serialized text at the field's position, enclosure included
    pub fn get(&self, field: &str) -> Option<&str> {
        self.cell(field).map(|cell| cell.raw.as_str())
    }

    /// Logical value at the field's position
    pub fn value(&self, field: &str) -> Option<String> {
        self.cell(field).map(|cell| cell.value(self.options.enclosure()))
    }

    pub fn was_quoted(&self, field: &str) -> Option<bool> {
        self.cell(field).map(|cell| cell.quoted)
    }

    /// Field names with their serialized text, in position order
    pub fn to_array(&self) -> Vec<(&str, Option<&str>)> {
        self.definition
            .ordered()
            .iter()
            .map(|field| (field.name.as_str(), self.get(&field.name)))
            .collect()
    }

    /// Logical values of every cell, in line order
    pub fn tokens(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|cell| {
                cell.as_ref()
                    .map(|c| c.value(self.options.enclosure()))
                    .unwrap_or_default()
            })
            .collect()
    }

    pub fn to_line(&self) -> String {
        let delimiter = self.options.delimiter().to_string();
        self.cells
            .iter()
            .map(|cell| cell.as_ref().map(|c| c.raw.as_str()).unwrap_or(""))
            .collect::<Vec<_>>()
            .join(&delimiter)
    }

    /// Best-matching candidate for the labels on this line
    pub fn detect_format<D: AsRef<FormatDefinition>>(&self, candidates: &[D]) -> Option<Detection> {
        let tokens = self.tokens();
        detect_tokens(tokens.as_slice(), candidates, self.options.min_confidence())
    }

    pub fn is_compatible_with_enum(&self, candidate: &FormatDefinition) -> bool {
        self.detect_format(std::slice::from_ref(&candidate)).is_some()
    }

    fn cell(&self, field: &str) -> Option<&Cell> {
        let position = self.definition.field(field)?.position;
        self.cells.get(position - 1)?.as_ref()
    }

    fn store(&mut self, field: &str, value: &str, quoted: bool) -> Result<()> {
        let position = self
            .definition
            .field(field)
            .map(FieldDefinition::position)
            .ok_or_else(|| DatevError::unknown_field(field))?;

        if !quoted && !fits_unquoted(value, self.options.delimiter(), self.options.enclosure()) {
            return Err(DatevError::invalid_value(
                field,
                position,
                "unquoted value would not read back as one cell",
            ));
        }
        if value.contains(['\r', '\n']) {
            return Err(DatevError::invalid_value(field, position, "value spans lines"));
        }

        if self.cells.len() < position {
            self.cells.resize(position, None);
        }
        self.cells[position - 1] = Some(Cell::new(value, quoted, self.options.enclosure()));
        Ok(())
    }
}

impl fmt::Display for HeaderLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datev_core::Category;

    fn account_labels() -> Arc<FormatDefinition> {
        Arc::new(
            FormatDefinition::new(
                Category::AccountLabels,
                700,
                vec![
                    FieldDefinition::new("konto", "Konto", 1)
                        .with_pattern(r"\d{1,9}")
                        .required(),
                    FieldDefinition::new("beschriftung", "Kontenbeschriftung", 2)
                        .with_pattern(r"[^\r\n]{0,40}")
                        .quoted_value()
                        .quoted_header(),
                    FieldDefinition::new("sprach_id", "Sprach-ID", 3)
                        .with_pattern("de-DE|en-GB")
                        .quoted_value(),
                ],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_set_applies_default_quoting() {
        let mut line = HeaderLine::new(account_labels());
        line.set("konto", "1200").unwrap();
        line.set("beschriftung", "Bank").unwrap();

        assert_eq!(line.get("konto"), Some("1200"));
        assert_eq!(line.get("beschriftung"), Some("\"Bank\""));
        assert_eq!(line.value("beschriftung").as_deref(), Some("Bank"));
        assert_eq!(line.get("sprach_id"), None);
        assert_eq!(line.to_line(), "1200;\"Bank\";");
    }

    #[test]
    fn test_quote_info_overrides_rule() {
        let mut line = HeaderLine::new(account_labels());
        line.set_with_quote_info("beschriftung", "Bank", false).unwrap();
        assert_eq!(line.get("beschriftung"), Some("Bank"));
        assert_eq!(line.was_quoted("beschriftung"), Some(false));

        line.set("beschriftung", "Bank").unwrap();
        assert_eq!(line.get("beschriftung"), Some("\"Bank\""));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut line = HeaderLine::new(account_labels());

        let err = line.set("konto", "12AB").unwrap_err();
        assert_eq!(
            err,
            DatevError::InvalidValue {
                field: "konto".to_string(),
                position: Some(1),
                reason: "value '12AB' does not match pattern '\\d{1,9}'".to_string(),
            }
        );
        assert!(line.set("unbekannt", "x").unwrap_err().is_invalid_value());
        assert!(line.set("sprach_id", "fr-FR").is_err());
        assert!(line.set_with_quote_info("beschriftung", "a;b", false).is_err());
        assert!(line.set("beschriftung", "a;b").is_ok());

        // failed calls leave nothing behind
        assert_eq!(line.get("konto"), None);
    }

    #[test]
    fn test_from_values_reports_first_position() {
        let err = HeaderLine::from_values(
            account_labels(),
            [("sprach_id", "xx"), ("konto", "abc")],
        )
        .unwrap_err();
        assert!(matches!(err, DatevError::InvalidValue { position: Some(1), .. }));

        let line = HeaderLine::from_values(
            account_labels(),
            vec![("beschriftung", "Kasse"), ("konto", "1000")],
        )
        .unwrap();
        assert_eq!(
            line.to_array(),
            vec![
                ("konto", Some("1000")),
                ("beschriftung", Some("\"Kasse\"")),
                ("sprach_id", None),
            ]
        );
    }

    #[test]
    fn test_labels_row() {
        let line = HeaderLine::labels(account_labels(), LineOptions::default());
        assert_eq!(line.to_string(), "Konto;\"Kontenbeschriftung\";Sprach-ID");
        assert!(line.is_compatible_with_enum(&account_labels()));
    }

    #[test]
    fn test_parse_keeps_raw_text() {
        let raw = "1200;Bank \"Nord\";\"de-DE\";extra";
        let line = HeaderLine::parse(account_labels(), raw, LineOptions::default());
        assert_eq!(line.to_line(), raw);
        assert_eq!(line.was_quoted("beschriftung"), Some(false));
        assert_eq!(line.value("sprach_id").as_deref(), Some("de-DE"));

        let short = HeaderLine::parse(account_labels(), "1200\r\n", LineOptions::default());
        assert_eq!(short.to_line(), "1200");
        assert_eq!(short.get("beschriftung"), None);
    }
}
