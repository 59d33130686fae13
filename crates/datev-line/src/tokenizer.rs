//! Splitting and quoting of delimiter-separated cells

/// One serialized cell of a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Cell {
    /// Text as written, enclosure included
    pub raw: String,
    pub quoted: bool,
}

impl Cell {
    pub fn new(value: &str, quoted: bool, enclosure: char) -> Self {
        let raw = if quoted {
            enclose(value, enclosure)
        } else {
            value.to_string()
        };
        Self { raw, quoted }
    }

    /// Logical value: enclosure stripped, doubled enclosures collapsed
    pub fn value(&self, enclosure: char) -> String {
        if self.quoted {
            unquote(&self.raw, enclosure)
        } else {
            self.raw.clone()
        }
    }
}

/// Splits one line on `delimiter`, ignoring delimiters inside enclosures.
///
/// Every cell keeps its exact text, so joining the cells with the delimiter
/// reproduces the input.
pub(crate) fn split(line: &str, delimiter: char, enclosure: char) -> Vec<Cell> {
    let mut cells = Vec::new();
    let mut start = 0;
    let mut in_enclosure = false;

    for (i, c) in line.char_indices() {
        if c == enclosure {
            // a doubled enclosure toggles twice and stays inside
            in_enclosure = !in_enclosure;
        } else if c == delimiter && !in_enclosure {
            cells.push(classify(&line[start..i], enclosure));
            start = i + c.len_utf8();
        }
    }
    cells.push(classify(&line[start..], enclosure));
    cells
}

fn classify(raw: &str, enclosure: char) -> Cell {
    let quoted = raw.len() >= 2 * enclosure.len_utf8() && raw.starts_with(enclosure) && raw.ends_with(enclosure);
    Cell {
        raw: raw.to_string(),
        quoted,
    }
}

/// Whether `value` written without enclosure reads back as one cell with
/// the same text: balanced enclosures and no delimiter outside them.
pub(crate) fn fits_unquoted(value: &str, delimiter: char, enclosure: char) -> bool {
    value.matches(enclosure).count() % 2 == 0 && split(value, delimiter, enclosure).len() == 1
}

pub(crate) fn enclose(value: &str, enclosure: char) -> String {
    let doubled: String = [enclosure, enclosure].iter().collect();
    let mut out = String::with_capacity(value.len() + 2);
    out.push(enclosure);
    out.push_str(&value.replace(enclosure, &doubled));
    out.push(enclosure);
    out
}

pub(crate) fn unquote(raw: &str, enclosure: char) -> String {
    let inner = raw
        .strip_prefix(enclosure)
        .and_then(|s| s.strip_suffix(enclosure))
        .unwrap_or(raw);
    let doubled: String = [enclosure, enclosure].iter().collect();
    inner.replace(&doubled, &enclosure.to_string())
}
