use std::path::Path;

use chrono::Datelike;
use rust_xlsxwriter::{Color, ExcelDateTime, Format, FormatAlign, Workbook, Worksheet};

use crate::classify::Classified;
use crate::error::Result;
use crate::metrics::round2;
use crate::model::{ComparisonRow, Tier};

/// Name of the single worksheet in the output workbook.
pub const SHEET_NAME: &str = "Categorized Facilities";

const HEADERS: [&str; 11] = [
    "Date",
    "Report Facility",
    "Template Facility",
    "Template File",
    "Sheet",
    "Actual Hours",
    "Census",
    "Actual HPPD",
    "Actual CNA HPPD",
    "Actual RN+LPN HPPD",
    "HPPD Budget Status",
];

const EMPTY_TIER_TEXT: &str = "No facilities in this category";
/// Eight-digit pattern the date column renders with.
const DATE_NUM_FORMAT: &str = "yyyymmdd";
const BAND_GREY: Color = Color::RGB(0xF2F2F2);
const MAX_COLUMN_WIDTH: usize = 50;

/// Renders the classified tiers into a single styled worksheet and saves it.
///
/// Each tier gets a bold title row, then either a placeholder row or a bold
/// centered header followed by one banded row per facility, with a blank
/// spacer row after populated sections. Banding alternates on absolute row
/// parity across the whole sheet, not per section.
pub fn write_report(path: &Path, classified: &Classified) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let mut row: u32 = 0;
    let mut widths = [0usize; HEADERS.len()];

    for tier in Tier::ALL {
        let entries = classified.tier(tier);

        worksheet.write_string_with_format(row, 0, tier.title(), &title_format())?;
        note_width(&mut widths, 0, tier.title());
        row += 1;

        if entries.is_empty() {
            worksheet.write_string_with_format(row, 0, EMPTY_TIER_TEXT, &banded(row))?;
            note_width(&mut widths, 0, EMPTY_TIER_TEXT);
            row += 2;
            continue;
        }

        let header_format = banded(row)
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);
        for (col, header) in HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(row, col as u16, *header, &header_format)?;
            note_width(&mut widths, col, header);
        }
        row += 1;

        for entry in entries {
            write_entry(worksheet, row, entry, &mut widths)?;
            row += 1;
        }
        row += 1;
    }

    for (col, longest) in widths.iter().enumerate() {
        let width = (longest + 2).min(MAX_COLUMN_WIDTH);
        worksheet.set_column_width(col as u16, width as f64)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_entry(
    worksheet: &mut Worksheet,
    row: u32,
    entry: &ComparisonRow,
    widths: &mut [usize; HEADERS.len()],
) -> Result<()> {
    let date_format = banded(row).set_num_format(DATE_NUM_FORMAT);
    let date = ExcelDateTime::from_ymd(
        entry.date.year() as u16,
        entry.date.month() as u8,
        entry.date.day() as u8,
    )?;
    worksheet.write_datetime_with_format(row, 0, &date, &date_format)?;
    widths[0] = widths[0].max(DATE_NUM_FORMAT.len());

    let texts = [
        (1u16, entry.report_facility.as_str()),
        (2, entry.template_facility.as_str()),
        (3, entry.template_file.as_str()),
        (4, entry.template_sheet.as_str()),
    ];
    for (col, text) in texts {
        worksheet.write_string_with_format(row, col, text, &banded(row))?;
        note_width(widths, col as usize, text);
    }

    let numbers = [
        (5u16, Some(round2(entry.actual_hours))),
        (6, Some(round2(entry.census))),
        (7, entry.hppd),
        (8, entry.cna_hppd),
        (9, entry.rn_lpn_hppd),
    ];
    for (col, value) in numbers {
        match value {
            Some(value) => {
                worksheet.write_number_with_format(row, col, value, &banded(row))?;
                note_width(widths, col as usize, &value.to_string());
            }
            None => {
                worksheet.write_blank(row, col, &banded(row))?;
            }
        }
    }

    let status = entry.status.to_string();
    worksheet.write_string_with_format(row, 10, &status, &banded(row))?;
    note_width(widths, 10, &status);
    Ok(())
}

fn title_format() -> Format {
    Format::new().set_bold().set_font_size(12)
}

/// Fill keyed to absolute 1-based row parity: even rows grey, odd rows white.
fn banded(row: u32) -> Format {
    let color = if (row + 1) % 2 == 0 {
        BAND_GREY
    } else {
        Color::White
    };
    Format::new().set_background_color(color)
}

fn note_width(widths: &mut [usize; HEADERS.len()], col: usize, text: &str) {
    widths[col] = widths[col].max(text.len());
}
