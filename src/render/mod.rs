//! Output rendering.
//!
//! Sheets render to CSV records; model values render to JSON.
//!
//! # Example
//!
//! ```no_run
//! use offex::render::{to_csv, CsvOptions};
//! use offex::xlsx::XlsxParser;
//!
//! let workbook = XlsxParser::open("data.xlsx")?.parse()?;
//! for sheet in &workbook.sheets {
//!     print!("{}", to_csv(sheet, &CsvOptions::default()));
//! }
//! # Ok::<(), offex::Error>(())
//! ```

mod csv;
mod json;
mod options;

pub use csv::{escape_field, format_row, to_csv, write_row, write_sheet};
pub use json::{to_json, JsonFormat};
pub use options::{CsvOptions, LineEnding};
