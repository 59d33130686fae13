//! Format sniffing by label identity
//!
//! A physical line carries no type tag; only its label set tells which
//! category it belongs to. Candidates are ranked by how many distinct line
//! tokens appear among their labels, ignoring positions.

use datev_core::{Category, FormatDefinition};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

/// Winning candidate of a detection run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    /// Index into the candidate slice
    pub index: usize,
    pub category: Category,
    pub version: u32,
    /// Distinct tokens found among the candidate's labels
    pub score: usize,
    /// `score / max(distinct tokens, distinct labels)`
    pub confidence: f64,
}

impl Detection {
    /// Ranking order: score, then confidence, then version.
    ///
    /// Candidates equal on all three keep their slice order, so the earlier
    /// one wins.
    fn rank(&self, other: &Detection) -> Ordering {
        self.score
            .cmp(&other.score)
            .then(self.confidence.total_cmp(&other.confidence))
            .then(self.version.cmp(&other.version))
    }
}

/// Picks the best candidate for `tokens`, or `None` when no candidate
/// reaches `min_confidence`. Empty tokens are ignored.
pub fn detect_tokens<S, D>(tokens: &[S], candidates: &[D], min_confidence: f64) -> Option<Detection>
where
    S: AsRef<str>,
    D: AsRef<FormatDefinition>,
{
    let distinct: HashSet<&str> = tokens
        .iter()
        .map(AsRef::as_ref)
        .filter(|t| !t.is_empty())
        .collect();
    if distinct.is_empty() {
        return None;
    }

    let mut best: Option<Detection> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let definition = candidate.as_ref();
        let labels: HashSet<&str> = definition.labels().collect();
        let score = distinct.iter().filter(|t| labels.contains(*t)).count();
        if score == 0 {
            continue;
        }

        let confidence = score as f64 / distinct.len().max(labels.len()) as f64;
        if confidence < min_confidence {
            continue;
        }

        let detection = Detection {
            index,
            category: definition.category(),
            version: definition.version(),
            score,
            confidence,
        };
        match &best {
            Some(current) if detection.rank(current) != Ordering::Greater => {}
            _ => best = Some(detection),
        }
    }

    match &best {
        Some(d) => debug!(category = %d.category, version = d.version, score = d.score, "format detected"),
        None => debug!(candidates = candidates.len(), "no format reached the confidence threshold"),
    }
    best
}
