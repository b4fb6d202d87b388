use crate::model::{ComparisonRow, Tier};

/// HPPD band counted as on target for tier purposes.
const HPPD_BAND: (f64, f64) = (3.00, 3.30);
/// CNA HPPD band counted as a good split.
const CNA_BAND: (f64, f64) = (2.00, 2.06);
/// Upper RN+LPN HPPD bound counted as a good split.
const RN_LPN_MAX: f64 = 1.20;

/// The three report sections after classification, in output order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Classified {
    pub good_split_on_target: Vec<ComparisonRow>,
    pub bad_split_on_target: Vec<ComparisonRow>,
    pub bad_split_off_target: Vec<ComparisonRow>,
}

impl Classified {
    /// Rows of one tier, in the order they were assigned.
    pub fn tier(&self, tier: Tier) -> &[ComparisonRow] {
        match tier {
            Tier::GoodSplitOnTarget => &self.good_split_on_target,
            Tier::BadSplitOnTarget => &self.bad_split_on_target,
            Tier::BadSplitOffTarget => &self.bad_split_off_target,
        }
    }

    /// Row counts per tier, in output order.
    pub fn counts(&self) -> [usize; 3] {
        [
            self.good_split_on_target.len(),
            self.bad_split_on_target.len(),
            self.bad_split_off_target.len(),
        ]
    }
}

/// Partitions comparison rows into the three tiers.
///
/// The passes are evaluated in strict priority order over a shrinking pool,
/// so membership is mutually exclusive. The partition is not exhaustive:
/// rows with an off-target HPPD but an otherwise good split match none of
/// the predicates and are dropped from the report. An undefined ratio fails
/// every predicate, so zero-census rows are never placed either.
pub fn classify(rows: Vec<ComparisonRow>) -> Classified {
    let mut classified = Classified::default();
    for row in rows {
        let hppd_ok = in_band(row.hppd, HPPD_BAND);
        let cna_ok = in_band(row.cna_hppd, CNA_BAND);
        let rn_lpn_ok = row.rn_lpn_hppd.is_some_and(|v| v <= RN_LPN_MAX);
        let split_bad = row.cna_hppd.is_some_and(|v| v < CNA_BAND.0)
            || row.rn_lpn_hppd.is_some_and(|v| v > RN_LPN_MAX);

        if hppd_ok && cna_ok && rn_lpn_ok {
            classified.good_split_on_target.push(row);
        } else if hppd_ok && split_bad {
            classified.bad_split_on_target.push(row);
        } else if !hppd_ok && split_bad {
            classified.bad_split_off_target.push(row);
        }
        // Off-target HPPD with a good split matches no tier and is dropped.
    }
    classified
}

fn in_band(value: Option<f64>, (lo, hi): (f64, f64)) -> bool {
    value.is_some_and(|v| v >= lo && v <= hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::budget_status;
    use chrono::NaiveDate;

    fn row(hppd: Option<f64>, cna: Option<f64>, rn_lpn: Option<f64>) -> ComparisonRow {
        ComparisonRow {
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            report_facility: "TOTAL NURSING WRKD - SUNNY ACRES".to_string(),
            template_facility: "Sunny Acres".to_string(),
            template_file: "budget.xlsx".to_string(),
            template_sheet: "5".to_string(),
            actual_hours: 320.0,
            census: 100.0,
            hppd,
            cna_hppd: cna,
            rn_lpn_hppd: rn_lpn,
            status: budget_status(hppd),
        }
    }

    #[test]
    fn good_split_on_target_takes_priority() {
        let classified = classify(vec![row(Some(3.20), Some(2.06), Some(1.18))]);
        assert_eq!(classified.counts(), [1, 0, 0]);
    }

    #[test]
    fn bad_split_on_target_catches_low_cna_and_high_rn_lpn() {
        let classified = classify(vec![
            row(Some(3.10), Some(1.90), Some(1.10)),
            row(Some(3.10), Some(2.03), Some(1.30)),
        ]);
        assert_eq!(classified.counts(), [0, 2, 0]);
    }

    #[test]
    fn bad_split_off_target_requires_both_failures() {
        let classified = classify(vec![row(Some(3.50), Some(1.80), Some(1.40))]);
        assert_eq!(classified.counts(), [0, 0, 1]);
    }

    #[test]
    fn off_target_with_good_split_is_dropped() {
        // Scenario B: 350 total hours over census 100, split still good.
        let classified = classify(vec![row(Some(3.50), Some(2.06), Some(1.18))]);
        assert_eq!(classified.counts(), [0, 0, 0]);
    }

    #[test]
    fn undefined_ratios_are_never_placed() {
        let classified = classify(vec![row(None, None, None)]);
        assert_eq!(classified.counts(), [0, 0, 0]);
    }

    #[test]
    fn band_edges_are_inclusive() {
        let low = row(Some(3.00), Some(2.00), Some(1.20));
        let high = row(Some(3.30), Some(2.06), Some(0.90));
        let classified = classify(vec![low, high]);
        assert_eq!(classified.counts(), [2, 0, 0]);
    }

    #[test]
    fn assignment_is_mutually_exclusive() {
        let rows = vec![
            row(Some(3.20), Some(2.06), Some(1.18)),
            row(Some(3.20), Some(1.90), Some(1.18)),
            row(Some(3.60), Some(1.90), Some(1.40)),
            row(Some(3.60), Some(2.03), Some(1.10)),
        ];
        let total = rows.len();
        let classified = classify(rows);
        let assigned: usize = classified.counts().iter().sum();
        assert_eq!(assigned, 3);
        assert!(assigned <= total);
    }
}
