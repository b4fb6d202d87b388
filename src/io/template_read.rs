use std::path::Path;

use calamine::{Reader, Xlsx, open_workbook};
use chrono::NaiveDate;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::io::{cell_to_date, cell_to_number, cell_to_text, file_name, workbook_paths};
use crate::model::{Skip, SkipReason, TemplateEntry};
use crate::normalize::normalize_name;

/// Cover sheet every template workbook carries the facility name on.
pub const COVER_SHEET: &str = "1";

/// D3 on the cover sheet: the facility's full name.
const FACILITY_CELL: (u32, u32) = (2, 3);
/// B11 on each worksheet: the date the sheet covers.
const DATE_CELL: (u32, u32) = (10, 1);
/// E27 on each worksheet: the patient census.
const CENSUS_CELL: (u32, u32) = (26, 4);

/// Extracts one [`TemplateEntry`] per qualifying worksheet from every
/// `.xlsx` workbook in the templates folder.
///
/// Extraction is best-effort: a worksheet whose date or census cell does not
/// parse, or a file whose cover sheet is unusable, is skipped with a
/// diagnostic rather than failing the run. Only listing the folder itself
/// can fail. Calamine returns cached formula results, so computed cells read
/// as their stored values.
#[instrument(level = "debug", skip_all, fields(dir = %dir.display()))]
pub fn extract_entries(
    dir: &Path,
    target_date: Option<NaiveDate>,
) -> Result<(Vec<TemplateEntry>, Vec<Skip>)> {
    let mut entries = Vec::new();
    let mut skips = Vec::new();

    for path in workbook_paths(dir, &["xlsx"])? {
        let source = file_name(&path);
        let mut workbook: Xlsx<_> = match open_workbook(&path) {
            Ok(workbook) => workbook,
            Err(err) => {
                skips.push(Skip::file(
                    source,
                    SkipReason::UnreadableWorkbook(err.to_string()),
                ));
                continue;
            }
        };

        let facility = match read_cover_facility(&mut workbook) {
            Ok(facility) => facility,
            Err(reason) => {
                skips.push(Skip::file(source, reason));
                continue;
            }
        };
        let normalized_name = normalize_name(&facility);

        let sheet_names = workbook.sheet_names().to_owned();
        for sheet in sheet_names {
            match read_sheet(&mut workbook, &sheet, target_date) {
                Ok(Some((date, census))) => entries.push(TemplateEntry {
                    facility: facility.clone(),
                    normalized_name: normalized_name.clone(),
                    date,
                    census,
                    source_file: source.clone(),
                    sheet,
                }),
                Ok(None) => {}
                Err(reason) => skips.push(Skip::sheet(source.clone(), sheet, reason)),
            }
        }
    }

    debug!(
        entry_count = entries.len(),
        skip_count = skips.len(),
        "template extraction finished"
    );
    Ok((entries, skips))
}

fn read_cover_facility<RS: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<RS>,
) -> std::result::Result<String, SkipReason> {
    let range = workbook
        .worksheet_range(COVER_SHEET)
        .ok_or_else(|| SkipReason::MissingSheet(COVER_SHEET.to_string()))?
        .map_err(|err| SkipReason::UnreadableWorkbook(err.to_string()))?;
    cell_to_text(range.get_value(FACILITY_CELL)).ok_or(SkipReason::MissingFacility("D3"))
}

/// Reads one worksheet's date and census. `Ok(None)` means the sheet is
/// valid but excluded by the date filter.
fn read_sheet<RS: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<RS>,
    sheet: &str,
    target_date: Option<NaiveDate>,
) -> std::result::Result<Option<(NaiveDate, f64)>, SkipReason> {
    let range = workbook
        .worksheet_range(sheet)
        .ok_or_else(|| SkipReason::MissingSheet(sheet.to_string()))?
        .map_err(|err| SkipReason::UnreadableWorkbook(err.to_string()))?;

    let date = cell_to_date(range.get_value(DATE_CELL)).ok_or(SkipReason::BadDate("B11"))?;
    if target_date.is_some_and(|wanted| wanted != date) {
        return Ok(None);
    }
    let census = cell_to_number(range.get_value(CENSUS_CELL)).ok_or(SkipReason::BadNumber("E27"))?;
    Ok(Some((date, census)))
}
