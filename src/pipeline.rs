use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::{debug, info, instrument};

use crate::classify;
use crate::error::Result;
use crate::io::{report_read, report_write, template_read};
use crate::matcher::{DEFAULT_CUTOFF, FacilityIndex};
use crate::metrics;
use crate::model::{ComparisonRow, ReportRecord, Skip, SkipReason, TemplateEntry};

/// Inputs of one reconciliation run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Folder of budget template workbooks.
    pub templates_dir: PathBuf,
    /// Folder of legacy actual-hours report workbooks.
    pub reports_dir: PathBuf,
    /// When set, only worksheets and reports covering this date take part.
    pub target_date: Option<NaiveDate>,
    /// Destination of the categorized report workbook.
    pub output_path: PathBuf,
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Where the report was written.
    pub output_path: PathBuf,
    /// Facilities per tier, in output order.
    pub tier_counts: [usize; 3],
    /// Every input skipped along the way, with its reason. Never raised as
    /// an error; callers decide whether to surface the counts.
    pub diagnostics: Vec<Skip>,
}

/// Runs the full reconciliation: extract both workbook families, match
/// facilities, compute HPPD ratios, classify, and write the tiered report.
///
/// Synchronous single pass over pre-materialized folders; no retries.
/// Per-file and per-sheet problems become diagnostics in the summary, while
/// structural failures (unreadable folder, unwritable output) propagate.
#[instrument(
    level = "info",
    skip_all,
    fields(
        templates = %config.templates_dir.display(),
        reports = %config.reports_dir.display(),
        output = %config.output_path.display(),
    )
)]
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let (templates, mut diagnostics) =
        template_read::extract_entries(&config.templates_dir, config.target_date)?;
    info!(template_count = templates.len(), "template entries extracted");

    let (reports, report_skips) =
        report_read::extract_records(&config.reports_dir, config.target_date)?;
    info!(report_count = reports.len(), "report records extracted");
    diagnostics.extend(report_skips);

    let index = FacilityIndex::from_entries(&templates);
    let mut rows = Vec::new();
    for report in &reports {
        match pair(report, &index, &templates) {
            Ok(row) => rows.push(row),
            Err(reason) => diagnostics.push(Skip::file(report.source_file.clone(), reason)),
        }
    }
    debug!(row_count = rows.len(), "comparison rows assembled");

    let classified = classify::classify(rows);
    let tier_counts = classified.counts();
    report_write::write_report(&config.output_path, &classified)?;
    info!(
        ?tier_counts,
        skip_count = diagnostics.len(),
        "categorized report written"
    );

    Ok(RunSummary {
        output_path: config.output_path.clone(),
        tier_counts,
        diagnostics,
    })
}

/// Matches one report to its template entry for the same date and derives
/// the comparison row, or says why the report drops out.
fn pair(
    report: &ReportRecord,
    index: &FacilityIndex,
    templates: &[TemplateEntry],
) -> std::result::Result<ComparisonRow, SkipReason> {
    let facility = index
        .best_match(&report.facility, DEFAULT_CUTOFF)
        .ok_or_else(|| SkipReason::UnmatchedFacility(report.facility.clone()))?;

    // First entry in extraction order wins when a facility has several
    // sheets for the same date.
    let template = templates
        .iter()
        .find(|entry| entry.facility == facility && entry.date == report.date)
        .ok_or_else(|| SkipReason::NoTemplateForDate {
            facility: facility.to_string(),
            date: report.date,
        })?;

    Ok(metrics::compare(report, template))
}
