//! Codec configuration
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("invalid line options: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("delimiter and enclosure must differ (both '{0}')")]
    SameCharacter(char),
    #[error("line terminator '{0:?}' cannot be used as delimiter or enclosure")]
    LineTerminator(char),
    #[error("min_confidence must lie in 0..=1, got {0}")]
    ConfidenceRange(f64),
}

/// How lines are split, joined and sniffed.
///
/// Fields are private so every instance is checked; build one with
/// [`LineOptions::new`], [`LineOptions::from_yaml`] or `Default`.
///
/// ```yaml
/// delimiter: ";"
/// enclosure: "\""
/// min_confidence: 0.5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OptionsDocument")]
pub struct LineOptions {
    delimiter: char,
    enclosure: char,
    /// Lowest label-match confidence accepted by format detection
    min_confidence: f64,
}

/// Unchecked YAML form; omitted keys keep their defaults
#[derive(Debug, Deserialize)]
#[serde(default)]
struct OptionsDocument {
    delimiter: char,
    enclosure: char,
    min_confidence: f64,
}

impl Default for OptionsDocument {
    fn default() -> Self {
        let defaults = LineOptions::default();
        Self {
            delimiter: defaults.delimiter,
            enclosure: defaults.enclosure,
            min_confidence: defaults.min_confidence,
        }
    }
}

impl TryFrom<OptionsDocument> for LineOptions {
    type Error = OptionsError;

    fn try_from(doc: OptionsDocument) -> Result<Self, Self::Error> {
        LineOptions::new(doc.delimiter, doc.enclosure, doc.min_confidence)
    }
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            delimiter: ';',
            enclosure: '"',
            min_confidence: 0.5,
        }
    }
}

impl LineOptions {
    pub fn new(delimiter: char, enclosure: char, min_confidence: f64) -> Result<Self, OptionsError> {
        let options = Self {
            delimiter,
            enclosure,
            min_confidence,
        };
        options.validate()?;
        Ok(options)
    }

    /// Parse options from YAML; omitted keys keep their defaults
    pub fn from_yaml(source: &str) -> Result<Self, OptionsError> {
        let doc: OptionsDocument = serde_yaml::from_str(source)?;
        doc.try_into()
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn enclosure(&self) -> char {
        self.enclosure
    }

    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    fn validate(&self) -> Result<(), OptionsError> {
        if self.delimiter == self.enclosure {
            return Err(OptionsError::SameCharacter(self.delimiter));
        }
        for c in [self.delimiter, self.enclosure] {
            if c == '\n' || c == '\r' {
                return Err(OptionsError::LineTerminator(c));
            }
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(OptionsError::ConfidenceRange(self.min_confidence));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = LineOptions::default();
        assert_eq!(options.delimiter(), ';');
        assert_eq!(options.enclosure(), '"');
        assert_eq!(options.min_confidence(), 0.5);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let options = LineOptions::from_yaml("delimiter: ','\nmin_confidence: 0.8\n").unwrap();
        assert_eq!(options.delimiter(), ',');
        assert_eq!(options.enclosure(), '"');
        assert_eq!(options.min_confidence(), 0.8);
    }

    #[test]
    fn test_rejects_bad_options() {
        assert!(matches!(
            LineOptions::from_yaml("enclosure: ';'"),
            Err(OptionsError::SameCharacter(';'))
        ));
        assert!(matches!(
            LineOptions::from_yaml("min_confidence: 1.5"),
            Err(OptionsError::ConfidenceRange(_))
        ));
        assert!(matches!(
            LineOptions::from_yaml("delimiter: [1, 2]"),
            Err(OptionsError::Parse(_))
        ));
        assert!(matches!(
            LineOptions::new(',', ',', 0.5),
            Err(OptionsError::SameCharacter(','))
        ));
        assert!(matches!(
            LineOptions::new('\n', '"', 0.5),
            Err(OptionsError::LineTerminator('\n'))
        ));
    }

    #[test]
    fn test_direct_deserialize_is_validated() {
        let err = serde_yaml::from_str::<LineOptions>("delimiter: '\"'").unwrap_err();
        assert!(err.to_string().contains("delimiter and enclosure must differ"));
        let options: LineOptions = serde_yaml::from_str("min_confidence: 0.25").unwrap();
        assert_eq!(options.min_confidence(), 0.25);
    }
}
