//! In-memory model for extracted workbooks.
//!
//! Parsers fill these structures; renderers turn them into CSV or JSON.

mod cell;
mod workbook;

pub use cell::CellValue;
pub use workbook::{Row, Sheet, Workbook};
