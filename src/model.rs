use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One qualifying worksheet of a budget template workbook: a facility's
/// target staffing figures for a single date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateEntry {
    /// Facility name exactly as it appears on the cover sheet.
    pub facility: String,
    /// Canonical form of the facility name used for matching.
    pub normalized_name: String,
    /// Date the worksheet covers.
    pub date: NaiveDate,
    /// Patient census, the HPPD denominator.
    pub census: f64,
    /// File the entry was read from.
    pub source_file: String,
    /// Worksheet label within that file.
    pub sheet: String,
}

/// One legacy actual-hours report file: worked hours for a facility on a
/// single date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    /// Facility name as reported, usually carrying a "total nursing" prefix.
    pub facility: String,
    /// Date the report covers.
    pub date: NaiveDate,
    /// Total worked hours across all nursing roles.
    pub total_hours: f64,
    /// CNA worked hours.
    pub cna_hours: f64,
    /// Combined RN and LPN worked hours (sum of the two source cells).
    pub rn_lpn_hours: f64,
    /// File the record was read from.
    pub source_file: String,
}

/// Classification of a facility's actual HPPD against the 3.20 budget target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetStatus {
    MissingData,
    OnTarget,
    OverBudget,
    UnderBudget,
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetStatus::MissingData => write!(f, "Missing Data"),
            BudgetStatus::OnTarget => write!(f, "On Target"),
            BudgetStatus::OverBudget => write!(f, "Over Budget"),
            BudgetStatus::UnderBudget => write!(f, "Under Budget"),
        }
    }
}

/// Join of a report record with its matched template entry for the same
/// date. The three ratio fields hold values already rounded to two decimal
/// places; they are `None` when the census is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub date: NaiveDate,
    pub report_facility: String,
    pub template_facility: String,
    pub template_file: String,
    pub template_sheet: String,
    pub actual_hours: f64,
    pub census: f64,
    pub hppd: Option<f64>,
    pub cna_hppd: Option<f64>,
    pub rn_lpn_hppd: Option<f64>,
    pub status: BudgetStatus,
}

/// The three mutually exclusive report sections, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    GoodSplitOnTarget,
    BadSplitOnTarget,
    BadSplitOffTarget,
}

impl Tier {
    /// All tiers in their fixed report order.
    pub const ALL: [Tier; 3] = [
        Tier::GoodSplitOnTarget,
        Tier::BadSplitOnTarget,
        Tier::BadSplitOffTarget,
    ];

    /// Human-readable section title spelling out the tier's criteria.
    pub fn title(&self) -> &'static str {
        match self {
            Tier::GoodSplitOnTarget => {
                "Good HPPD & Good Split (3.0<HPPD<3.3, 2.00<CNA<2.06, RN+LPN<=1.20)"
            }
            Tier::BadSplitOnTarget => {
                "Good HPPD & Bad Split (3.0<HPPD<3.3, CNA<2.00, RN+LPN>1.20)"
            }
            Tier::BadSplitOffTarget => {
                "Bad HPPD & Bad Split (HPPD>3.3 | HPPD<3.0, CNA<2.00, RN+LPN>1.20)"
            }
        }
    }
}

/// Reason an input file, worksheet, or report row was left out of the run.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum SkipReason {
    /// The workbook could not be opened or read at all.
    #[error("unreadable workbook: {0}")]
    UnreadableWorkbook(String),

    /// A sheet the format requires is absent or unreadable.
    #[error("missing sheet '{0}'")]
    MissingSheet(String),

    /// The fixed facility-name cell is empty or not text.
    #[error("no facility name in cell {0}")]
    MissingFacility(&'static str),

    /// The fixed date cell did not parse as a date.
    #[error("unparseable date in cell {0}")]
    BadDate(&'static str),

    /// A fixed numeric cell did not parse as a number.
    #[error("unparseable number in cell {0}")]
    BadNumber(&'static str),

    /// No template facility name cleared the similarity cutoff.
    #[error("no template facility matched '{0}'")]
    UnmatchedFacility(String),

    /// A facility matched but no template entry shares the report's date.
    #[error("no template entry for '{facility}' on {date}")]
    NoTemplateForDate { facility: String, date: NaiveDate },
}

/// A single skipped input, recorded instead of thrown so callers can surface
/// skip counts without changing control flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Skip {
    /// File the problem was found in.
    pub source: String,
    /// Worksheet within the file, when the skip is sheet-scoped.
    pub sheet: Option<String>,
    pub reason: SkipReason,
}

impl Skip {
    /// Records a skip covering a whole file.
    pub fn file(source: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            source: source.into(),
            sheet: None,
            reason,
        }
    }

    /// Records a skip scoped to one worksheet of a file.
    pub fn sheet(source: impl Into<String>, sheet: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            source: source.into(),
            sheet: Some(sheet.into()),
            reason,
        }
    }
}
