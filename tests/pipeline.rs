use std::fs;
use std::path::{Path, PathBuf};

use calamine::{DataType, Range, Reader, Xlsx, open_workbook};
use chrono::NaiveDate;
use hppd_recon::model::SkipReason;
use hppd_recon::pipeline::{RunConfig, run};
use rust_xlsxwriter::Workbook;
use tempfile::tempdir;

const TIER_TITLES: [&str; 3] = [
    "Good HPPD & Good Split (3.0<HPPD<3.3, 2.00<CNA<2.06, RN+LPN<=1.20)",
    "Good HPPD & Bad Split (3.0<HPPD<3.3, CNA<2.00, RN+LPN>1.20)",
    "Bad HPPD & Bad Split (HPPD>3.3 | HPPD<3.0, CNA<2.00, RN+LPN>1.20)",
];

fn write_template(path: &Path, facility: &str, date: &str, census: f64) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("1").expect("cover sheet named");
    sheet.write_string(2, 3, facility).expect("facility cell");
    sheet.write_string(10, 1, date).expect("date cell");
    sheet.write_number(26, 4, census).expect("census cell");
    workbook.save(path).expect("template fixture written");
}

fn write_report(path: &Path, facility: &str, date: &str, total: f64, cna: f64, rn: f64, lpn: f64) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Sheet3").expect("report sheet named");
    sheet.write_string(3, 1, date).expect("date cell");
    sheet.write_string(4, 1, facility).expect("facility cell");
    sheet.write_number(10, 7, rn).expect("RN hours cell");
    sheet.write_number(11, 7, lpn).expect("LPN hours cell");
    sheet.write_number(12, 7, cna).expect("CNA hours cell");
    sheet.write_number(13, 7, total).expect("total hours cell");
    workbook.save(path).expect("report fixture written");
}

fn fixture_dirs(root: &Path) -> (PathBuf, PathBuf) {
    let templates = root.join("templates");
    let reports = root.join("reports");
    fs::create_dir(&templates).expect("templates folder");
    fs::create_dir(&reports).expect("reports folder");
    (templates, reports)
}

fn load_output(path: &Path) -> Range<DataType> {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("output opened");
    workbook
        .worksheet_range("Categorized Facilities")
        .expect("output sheet present")
        .expect("output sheet readable")
}

fn text(range: &Range<DataType>, row: u32, col: u32) -> String {
    range
        .get_value((row, col))
        .and_then(|cell| cell.get_string())
        .unwrap_or_default()
        .to_string()
}

fn number(range: &Range<DataType>, row: u32, col: u32) -> f64 {
    match range.get_value((row, col)) {
        Some(DataType::Float(value)) => *value,
        Some(DataType::Int(value)) => *value as f64,
        Some(DataType::DateTime(value)) => *value,
        other => panic!("expected a number at ({row}, {col}), got {other:?}"),
    }
}

#[test]
fn on_target_facility_lands_in_the_good_tier() {
    let temp_dir = tempdir().expect("temporary directory");
    let (templates, reports) = fixture_dirs(temp_dir.path());
    write_template(&templates.join("sunny.xlsx"), "Sunny Acres", "2024-01-05", 100.0);
    write_report(
        &reports.join("sunny.xlsx"),
        "TOTAL NURSING WRKD - SUNNY ACRES",
        "2024-01-05",
        320.0,
        206.0,
        60.0,
        58.0,
    );

    let output = temp_dir.path().join("categorized.xlsx");
    let summary = run(&RunConfig {
        templates_dir: templates,
        reports_dir: reports,
        target_date: None,
        output_path: output.clone(),
    })
    .expect("run succeeds");

    assert_eq!(summary.tier_counts, [1, 0, 0]);
    assert!(summary.diagnostics.is_empty());

    let range = load_output(&output);
    assert_eq!(text(&range, 0, 0), TIER_TITLES[0]);
    assert_eq!(text(&range, 1, 0), "Date");
    assert_eq!(text(&range, 1, 10), "HPPD Budget Status");
    // Serial 45296 is 2024-01-05 in the 1900 date system.
    assert_eq!(number(&range, 2, 0), 45296.0);
    assert_eq!(text(&range, 2, 1), "TOTAL NURSING WRKD - SUNNY ACRES");
    assert_eq!(text(&range, 2, 2), "Sunny Acres");
    assert_eq!(text(&range, 2, 3), "sunny.xlsx");
    assert_eq!(text(&range, 2, 4), "1");
    assert_eq!(number(&range, 2, 5), 320.0);
    assert_eq!(number(&range, 2, 6), 100.0);
    assert_eq!(number(&range, 2, 7), 3.2);
    assert_eq!(number(&range, 2, 8), 2.06);
    assert_eq!(number(&range, 2, 9), 1.18);
    assert_eq!(text(&range, 2, 10), "On Target");

    // The two empty tiers render placeholders after a blank spacer row.
    assert_eq!(text(&range, 4, 0), TIER_TITLES[1]);
    assert_eq!(text(&range, 5, 0), "No facilities in this category");
    assert_eq!(text(&range, 7, 0), TIER_TITLES[2]);
    assert_eq!(text(&range, 8, 0), "No facilities in this category");
}

#[test]
fn over_budget_with_good_split_is_dropped_from_the_report() {
    let temp_dir = tempdir().expect("temporary directory");
    let (templates, reports) = fixture_dirs(temp_dir.path());
    write_template(&templates.join("sunny.xlsx"), "Sunny Acres", "2024-01-05", 100.0);
    write_report(
        &reports.join("sunny.xlsx"),
        "TOTAL NURSING WRKD - SUNNY ACRES",
        "2024-01-05",
        350.0,
        206.0,
        60.0,
        58.0,
    );

    let output = temp_dir.path().join("categorized.xlsx");
    let summary = run(&RunConfig {
        templates_dir: templates,
        reports_dir: reports,
        target_date: None,
        output_path: output.clone(),
    })
    .expect("run succeeds");

    // The row reached the calculator but matched no tier predicate.
    assert_eq!(summary.tier_counts, [0, 0, 0]);
    assert!(summary.diagnostics.is_empty());

    let range = load_output(&output);
    for (title_row, title) in [(0, TIER_TITLES[0]), (3, TIER_TITLES[1]), (6, TIER_TITLES[2])] {
        assert_eq!(text(&range, title_row, 0), title);
        assert_eq!(text(&range, title_row + 1, 0), "No facilities in this category");
    }
}

#[test]
fn date_filter_excludes_other_days() {
    let temp_dir = tempdir().expect("temporary directory");
    let (templates, reports) = fixture_dirs(temp_dir.path());
    write_template(&templates.join("sunny.xlsx"), "Sunny Acres", "2024-01-05", 100.0);
    write_report(
        &reports.join("sunny.xlsx"),
        "TOTAL NURSING WRKD - SUNNY ACRES",
        "2024-01-05",
        320.0,
        206.0,
        60.0,
        58.0,
    );

    let output = temp_dir.path().join("categorized.xlsx");
    let summary = run(&RunConfig {
        templates_dir: templates,
        reports_dir: reports,
        target_date: NaiveDate::from_ymd_opt(2024, 1, 6),
        output_path: output,
    })
    .expect("run succeeds");

    // Filter misses are policy, not failures, so nothing is diagnosed.
    assert_eq!(summary.tier_counts, [0, 0, 0]);
    assert!(summary.diagnostics.is_empty());
}

#[test]
fn unmatched_and_unpaired_reports_are_diagnosed() {
    let temp_dir = tempdir().expect("temporary directory");
    let (templates, reports) = fixture_dirs(temp_dir.path());
    write_template(&templates.join("sunny.xlsx"), "Sunny Acres", "2024-01-05", 100.0);
    // Nothing like any template facility.
    write_report(
        &reports.join("other.xlsx"),
        "Completely Different Rehabilitation Center",
        "2024-01-05",
        320.0,
        206.0,
        60.0,
        58.0,
    );
    // Matches the facility but no template entry covers its date.
    write_report(
        &reports.join("sunny_next_day.xlsx"),
        "TOTAL NURSING WRKD - SUNNY ACRES",
        "2024-01-06",
        320.0,
        206.0,
        60.0,
        58.0,
    );

    let output = temp_dir.path().join("categorized.xlsx");
    let summary = run(&RunConfig {
        templates_dir: templates,
        reports_dir: reports,
        target_date: None,
        output_path: output,
    })
    .expect("run succeeds");

    assert_eq!(summary.tier_counts, [0, 0, 0]);
    assert_eq!(summary.diagnostics.len(), 2);
    assert!(summary.diagnostics.iter().any(|skip| {
        matches!(skip.reason, SkipReason::UnmatchedFacility(_)) && skip.source == "other.xlsx"
    }));
    assert!(summary.diagnostics.iter().any(|skip| {
        matches!(skip.reason, SkipReason::NoTemplateForDate { .. })
            && skip.source == "sunny_next_day.xlsx"
    }));
}

#[test]
fn malformed_template_sheets_are_skipped_not_fatal() {
    let temp_dir = tempdir().expect("temporary directory");
    let (templates, reports) = fixture_dirs(temp_dir.path());

    // Cover sheet with no facility name: the whole file is skipped.
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("1").expect("cover sheet named");
    sheet.write_string(10, 1, "2024-01-05").expect("date cell");
    sheet.write_number(26, 4, 100.0).expect("census cell");
    workbook
        .save(templates.join("broken.xlsx"))
        .expect("broken fixture written");

    write_template(&templates.join("sunny.xlsx"), "Sunny Acres", "2024-01-05", 100.0);
    write_report(
        &reports.join("sunny.xlsx"),
        "TOTAL NURSING WRKD - SUNNY ACRES",
        "2024-01-05",
        320.0,
        206.0,
        60.0,
        58.0,
    );

    let output = temp_dir.path().join("categorized.xlsx");
    let summary = run(&RunConfig {
        templates_dir: templates,
        reports_dir: reports,
        target_date: None,
        output_path: output,
    })
    .expect("run succeeds despite the broken template");

    assert_eq!(summary.tier_counts, [1, 0, 0]);
    assert!(summary.diagnostics.iter().any(|skip| {
        matches!(skip.reason, SkipReason::MissingFacility(_)) && skip.source == "broken.xlsx"
    }));
}
