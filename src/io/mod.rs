//! Spreadsheet adapters: calamine-based extractors for the two input
//! workbook families and the rust_xlsxwriter-based report renderer.

mod cells;
pub mod report_read;
pub mod report_write;
pub mod template_read;

use std::path::{Path, PathBuf};

pub(crate) use cells::{cell_to_date, cell_to_number, cell_to_text};

/// Lists the workbook files in a folder carrying one of the given
/// extensions, sorted by path so every run visits files in the same order.
pub(crate) fn workbook_paths(dir: &Path, extensions: &[&str]) -> std::io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let qualifies = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|want| ext.eq_ignore_ascii_case(want)));
        if qualifies {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// File name of a path as displayable text.
pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
