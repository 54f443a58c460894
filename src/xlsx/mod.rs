//! XLSX (Excel) workbook reader.
//!
//! Reads every worksheet of an Office Open XML workbook into a
//! [`Workbook`](crate::model::Workbook) of cell values.
//!
//! # Example
//!
//! ```no_run
//! use offex::xlsx::XlsxParser;
//!
//! let parser = XlsxParser::open("spreadsheet.xlsx")?;
//! let workbook = parser.parse()?;
//!
//! for sheet in &workbook.sheets {
//!     println!("{}: {} rows", sheet.name, sheet.row_count());
//! }
//! # Ok::<(), offex::Error>(())
//! ```

mod parser;
mod reference;
mod shared_strings;
mod styles;

pub use parser::{XlsxParser, WORKBOOK_PART};
pub use reference::{column_index, CellRef};
