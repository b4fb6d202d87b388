use calamine::DataType;
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Anchor of the Excel 1900 date system, offset so the serial for
/// 1900-03-01 onward lands on the right day despite the 1900 leap-year bug.
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// String date layouts accepted where a workbook stores a date as text.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%Y/%m/%d"];

/// Decodes a cell as a calendar date. Accepts format-native date serials
/// (already converted to the 1900 system by the reader) as well as a few
/// common text layouts.
pub(crate) fn cell_to_date(cell: Option<&DataType>) -> Option<NaiveDate> {
    match cell {
        Some(DataType::DateTime(serial)) => serial_to_date(*serial),
        Some(DataType::Float(serial)) => serial_to_date(*serial),
        Some(DataType::Int(serial)) => serial_to_date(*serial as f64),
        Some(DataType::String(text)) => parse_date_text(text.trim()),
        _ => None,
    }
}

/// Decodes a cell as a real number. Numeric text is accepted, matching the
/// source data where census cells are occasionally typed as strings.
pub(crate) fn cell_to_number(cell: Option<&DataType>) -> Option<f64> {
    match cell {
        Some(DataType::Float(value)) => Some(*value),
        Some(DataType::Int(value)) => Some(*value as f64),
        Some(DataType::String(text)) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Decodes a cell as non-empty text.
pub(crate) fn cell_to_text(cell: Option<&DataType>) -> Option<String> {
    match cell {
        Some(DataType::String(text)) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        _ => None,
    }
}

fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let (year, month, day) = EXCEL_EPOCH;
    NaiveDate::from_ymd_opt(year, month, day)?
        .checked_add_signed(Duration::days(serial.trunc() as i64))
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }
    // Timestamps such as "2024-01-05 00:00:00" carry the date in front.
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.date())
        .ok()
}
