use std::path::Path;

use calamine::{DataType, Range, Reader, open_workbook_auto};
use chrono::NaiveDate;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::io::{cell_to_date, cell_to_number, cell_to_text, file_name, workbook_paths};
use crate::model::{ReportRecord, Skip, SkipReason};

/// Worksheet the legacy report format keeps its figures on.
pub const REPORT_SHEET: &str = "Sheet3";

/// B4: the date the report covers, as a native serial or date text.
const DATE_CELL: (u32, u32) = (3, 1);
/// B5: the facility name, usually prefixed with the worked-hours label.
const FACILITY_CELL: (u32, u32) = (4, 1);
/// H14: total worked hours.
const TOTAL_HOURS_CELL: (u32, u32) = (13, 7);
/// H13: CNA worked hours.
const CNA_HOURS_CELL: (u32, u32) = (12, 7);
/// H12 and H11: the two cells summed into RN+LPN hours.
const LPN_HOURS_CELL: (u32, u32) = (11, 7);
const RN_HOURS_CELL: (u32, u32) = (10, 7);

/// Extracts one [`ReportRecord`] per qualifying workbook in the reports
/// folder. The legacy feed is `.xls`; `.xlsx` files are accepted through the
/// same auto-detecting reader.
///
/// Any failure inside a file — missing sheet, unreadable cell, unparseable
/// value — discards that file with a diagnostic and moves on. Only listing
/// the folder itself can fail.
#[instrument(level = "debug", skip_all, fields(dir = %dir.display()))]
pub fn extract_records(
    dir: &Path,
    target_date: Option<NaiveDate>,
) -> Result<(Vec<ReportRecord>, Vec<Skip>)> {
    let mut records = Vec::new();
    let mut skips = Vec::new();

    for path in workbook_paths(dir, &["xls", "xlsx"])? {
        let source = file_name(&path);
        match read_file(&path, &source, target_date) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(reason) => skips.push(Skip::file(source, reason)),
        }
    }

    debug!(
        record_count = records.len(),
        skip_count = skips.len(),
        "report extraction finished"
    );
    Ok((records, skips))
}

/// Reads one report file. `Ok(None)` means the file is valid but excluded by
/// the date filter.
fn read_file(
    path: &Path,
    source: &str,
    target_date: Option<NaiveDate>,
) -> std::result::Result<Option<ReportRecord>, SkipReason> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|err| SkipReason::UnreadableWorkbook(err.to_string()))?;
    let range = workbook
        .worksheet_range(REPORT_SHEET)
        .ok_or_else(|| SkipReason::MissingSheet(REPORT_SHEET.to_string()))?
        .map_err(|err| SkipReason::UnreadableWorkbook(err.to_string()))?;

    let date = cell_to_date(range.get_value(DATE_CELL)).ok_or(SkipReason::BadDate("B4"))?;
    if target_date.is_some_and(|wanted| wanted != date) {
        return Ok(None);
    }

    let facility = cell_to_text(range.get_value(FACILITY_CELL))
        .ok_or(SkipReason::MissingFacility("B5"))?;
    let total_hours = hours(&range, TOTAL_HOURS_CELL, "H14")?;
    let cna_hours = hours(&range, CNA_HOURS_CELL, "H13")?;
    let rn_lpn_hours = hours(&range, LPN_HOURS_CELL, "H12")? + hours(&range, RN_HOURS_CELL, "H11")?;

    Ok(Some(ReportRecord {
        facility,
        date,
        total_hours,
        cna_hours,
        rn_lpn_hours,
        source_file: source.to_string(),
    }))
}

fn hours(
    range: &Range<DataType>,
    cell: (u32, u32),
    label: &'static str,
) -> std::result::Result<f64, SkipReason> {
    cell_to_number(range.get_value(cell)).ok_or(SkipReason::BadNumber(label))
}
