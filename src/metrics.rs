use crate::model::{BudgetStatus, ComparisonRow, ReportRecord, TemplateEntry};

/// Budgeted Hours Per Patient Day every facility is measured against.
pub const HPPD_TARGET: f64 = 3.20;

/// [`HPPD_TARGET`] expressed in hundredths, the precision statuses are
/// decided at.
const TARGET_HUNDREDTHS: i64 = 320;

/// Rounds to two decimal places, the precision every displayed ratio and
/// every classification threshold operates on.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Joins a report with its matched template entry for the same date and
/// derives the three HPPD ratios and the budget status.
///
/// A zero census leaves all three ratios undefined and the status at
/// "Missing Data".
pub fn compare(report: &ReportRecord, template: &TemplateEntry) -> ComparisonRow {
    let ratio = |hours: f64| {
        if template.census == 0.0 {
            None
        } else {
            Some(round2(hours / template.census))
        }
    };

    let hppd = ratio(report.total_hours);
    ComparisonRow {
        date: report.date,
        report_facility: report.facility.clone(),
        template_facility: template.facility.clone(),
        template_file: template.source_file.clone(),
        template_sheet: template.sheet.clone(),
        actual_hours: report.total_hours,
        census: template.census,
        hppd,
        cna_hppd: ratio(report.cna_hours),
        rn_lpn_hppd: ratio(report.rn_lpn_hours),
        status: budget_status(hppd),
    }
}

/// Classifies a rounded HPPD value against the 3.20 target. Comparisons run
/// in integer hundredths so values one cent off the target never fall inside
/// the tolerance band through float error.
pub fn budget_status(hppd: Option<f64>) -> BudgetStatus {
    let Some(value) = hppd else {
        return BudgetStatus::MissingData;
    };
    let hundredths = (value * 100.0).round() as i64;
    if hundredths == TARGET_HUNDREDTHS {
        BudgetStatus::OnTarget
    } else if hundredths > TARGET_HUNDREDTHS {
        BudgetStatus::OverBudget
    } else {
        BudgetStatus::UnderBudget
    }
}
