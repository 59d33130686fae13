//! Document categories of the interchange family
//!
//! The physical file carries the category as a numeric code in the meta
//! preamble; the data rows themselves carry no tag at all.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Business-document kind within the format family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Buchungsstapel
    BookingBatch,
    /// Debitoren/Kreditoren
    DebtorsCreditors,
    /// Kontenbeschriftungen
    AccountLabels,
    /// Zahlungsbedingungen
    PaymentTerms,
}

impl Category {
    const ALL: [Category; 4] = [
        Category::BookingBatch,
        Category::DebtorsCreditors,
        Category::AccountLabels,
        Category::PaymentTerms,
    ];

    /// Every category of the family, in declaration order
    pub fn all() -> &'static [Category] {
        &Self::ALL
    }

    /// Numeric "Formatkategorie" written into the preamble
    pub fn code(&self) -> u16 {
        match self {
            Category::BookingBatch => 21,
            Category::DebtorsCreditors => 16,
            Category::AccountLabels => 20,
            Category::PaymentTerms => 46,
        }
    }

    pub fn from_code(code: u16) -> Option<Category> {
        Self::ALL.iter().copied().find(|c| c.code() == code)
    }

    /// "Formatname" written into the preamble
    pub fn format_name(&self) -> &'static str {
        match self {
            Category::BookingBatch => "Buchungsstapel",
            Category::DebtorsCreditors => "Debitoren/Kreditoren",
            Category::AccountLabels => "Kontenbeschriftungen",
            Category::PaymentTerms => "Zahlungsbedingungen",
        }
    }

    /// Stable snake_case key, identical to the serde representation
    pub fn key(&self) -> &'static str {
        match self {
            Category::BookingBatch => "booking_batch",
            Category::DebtorsCreditors => "debtors_creditors",
            Category::AccountLabels => "account_labels",
            Category::PaymentTerms => "payment_terms",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.key() == s || c.format_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}
