//! CSV renderer implementation.

use crate::error::Result;
use crate::model::{CellValue, Sheet};
use std::borrow::Cow;
use std::io::Write;

use super::options::CsvOptions;

/// Quote a field if it contains the delimiter, a quote or a line break.
///
/// Embedded quotes are doubled.
pub fn escape_field(field: &str, delimiter: char) -> Cow<'_, str> {
    let needs_quotes = field
        .chars()
        .any(|c| c == delimiter || c == '"' || c == '\n' || c == '\r');

    if needs_quotes {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Render one row as a CSV record, terminator included.
///
/// Every cell produces a field; empty cells are empty fields. A row made of
/// a single empty field is written as `""` so that it still reads back as
/// one record.
pub fn format_row(row: &[CellValue], options: &CsvOptions) -> String {
    let mut line = String::new();

    if let [only] = row {
        if only.is_empty() {
            line.push_str("\"\"");
            line.push_str(options.line_ending.as_str());
            return line;
        }
    }

    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            line.push(options.delimiter);
        }
        let text = cell.to_string();
        line.push_str(&escape_field(&text, options.delimiter));
    }
    line.push_str(options.line_ending.as_str());
    line
}

/// Write one row as a CSV record.
pub fn write_row<W: Write>(writer: &mut W, row: &[CellValue], options: &CsvOptions) -> Result<()> {
    writer.write_all(format_row(row, options).as_bytes())?;
    Ok(())
}

/// Write every row of a sheet.
pub fn write_sheet<W: Write>(writer: &mut W, sheet: &Sheet, options: &CsvOptions) -> Result<()> {
    for row in sheet.rows() {
        write_row(writer, &row, options)?;
    }
    Ok(())
}

/// Render a sheet to a CSV string.
pub fn to_csv(sheet: &Sheet, options: &CsvOptions) -> String {
    sheet.rows().map(|row| format_row(&row, options)).collect()
}
