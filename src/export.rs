//! Writing extraction results to files.
//!
//! Everything is extracted in memory first; files are only created once
//! extraction has succeeded.

use crate::error::Result;
use crate::model::Workbook;
use crate::render::{write_sheet, CsvOptions};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Write text to `path` as UTF-8.
pub fn write_text(path: impl AsRef<Path>, text: &str) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    log::debug!("wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}

/// Output path for one sheet: `{base}_{sheet_name}.csv`.
///
/// Characters that cannot appear in file names are replaced by `_`.
pub fn sheet_csv_path(base: impl AsRef<Path>, sheet_name: &str) -> PathBuf {
    let base = base.as_ref();
    let mut file_name = base.file_name().unwrap_or_default().to_os_string();
    file_name.push("_");
    file_name.push(sanitize_file_component(sheet_name));
    file_name.push(".csv");
    base.with_file_name(file_name)
}

/// Replace characters that are reserved in file names on common platforms.
pub fn sanitize_file_component(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Write one CSV file per sheet, in workbook order.
///
/// Returns the paths written. When two sheet names map to the same file
/// name, the later sheet gets a numeric suffix (`base_a_b_2.csv`).
pub fn write_sheets(
    workbook: &Workbook,
    base: impl AsRef<Path>,
    options: &CsvOptions,
) -> Result<Vec<PathBuf>> {
    let base = base.as_ref();
    let mut written = Vec::with_capacity(workbook.sheets.len());
    let mut taken = HashSet::new();

    for sheet in &workbook.sheets {
        let mut path = sheet_csv_path(base, &sheet.name);
        let mut suffix = 2;
        while !taken.insert(path.clone()) {
            path = sheet_csv_path(base, &format!("{}_{}", sheet.name, suffix));
            suffix += 1;
        }
        if suffix > 2 {
            log::warn!(
                "sheet '{}' clashes with an earlier file name, writing {}",
                sheet.name,
                path.display()
            );
        }
        let mut writer = BufWriter::new(File::create(&path)?);
        write_sheet(&mut writer, sheet, options)?;
        writer.flush()?;
        log::debug!("wrote {} rows to {}", sheet.row_count(), path.display());
        written.push(path);
    }

    Ok(written)
}
