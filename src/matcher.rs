use std::collections::BTreeMap;

use crate::model::TemplateEntry;
use crate::normalize::report_core_name;

/// Minimum normalized-Levenshtein similarity a candidate must reach before a
/// report facility is considered matched.
pub const DEFAULT_CUTOFF: f64 = 0.4;

/// Index from normalized template facility names to the raw names registered
/// under them.
///
/// Distinct facilities can normalize to the same key; the index keeps every
/// raw name in registration order and resolves collisions with a keep-last
/// policy, so the most recently extracted template wins. Collisions stay
/// observable through [`FacilityIndex::collisions`] rather than being
/// silently overwritten.
#[derive(Debug, Default)]
pub struct FacilityIndex {
    by_normalized: BTreeMap<String, Vec<String>>,
}

impl FacilityIndex {
    /// Builds the index from extracted template entries, in order.
    pub fn from_entries(entries: &[TemplateEntry]) -> Self {
        let mut index = Self::default();
        for entry in entries {
            index.register(&entry.normalized_name, &entry.facility);
        }
        index
    }

    fn register(&mut self, normalized: &str, facility: &str) {
        let names = self.by_normalized.entry(normalized.to_string()).or_default();
        if names.last().map(String::as_str) != Some(facility) {
            names.push(facility.to_string());
        }
    }

    /// Raw facility name a normalized key resolves to (keep-last policy).
    fn resolve(&self, normalized: &str) -> Option<&str> {
        self.by_normalized
            .get(normalized)?
            .last()
            .map(String::as_str)
    }

    /// Normalized keys with more than one distinct raw name registered.
    pub fn collisions(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.by_normalized
            .iter()
            .filter(|(_, names)| names.len() > 1)
            .map(|(key, names)| (key.as_str(), names.as_slice()))
    }

    /// Fuzzy-matches a report facility name against the indexed template
    /// names and returns the raw name of the single best candidate at or
    /// above `cutoff`, or `None` when nothing clears it.
    ///
    /// Candidates are ranked by normalized Levenshtein similarity against
    /// the report's core name; ties resolve to the first candidate in the
    /// index's sorted key order. Pure and deterministic.
    pub fn best_match(&self, report_facility: &str, cutoff: f64) -> Option<&str> {
        let core = report_core_name(report_facility);
        let mut best: Option<(&str, f64)> = None;
        for key in self.by_normalized.keys() {
            let score = strsim::normalized_levenshtein(&core, key);
            if score >= cutoff && best.is_none_or(|(_, prev)| score > prev) {
                best = Some((key.as_str(), score));
            }
        }
        best.and_then(|(key, _)| self.resolve(key))
    }
}
