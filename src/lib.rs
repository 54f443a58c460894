//! # offex
//!
//! Plain-text extraction from Office Open XML documents.
//!
//! Two independent pipelines:
//!
//! - **DOCX → text**: every paragraph of `word/document.xml`, found at any
//!   nesting depth, with its run text concatenated. Empty paragraphs are
//!   dropped and the rest are joined with `\n`.
//! - **XLSX → CSV**: every worksheet, in workbook order, as a grid of cell
//!   values written to `{base}_{sheet_name}.csv`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use offex::render::CsvOptions;
//!
//! let text = offex::extract_text("brief.docx")?;
//! println!("{}", text);
//!
//! let files = offex::export_csv("model.xlsx", "model", &CsvOptions::default())?;
//! println!("wrote {} files", files.len());
//! # Ok::<(), offex::Error>(())
//! ```
//!
//! ## Features
//!
//! - `docx` (default): Word text extraction
//! - `xlsx` (default): Excel sheet extraction

pub mod container;
pub mod detect;
pub mod error;
pub mod export;
pub mod markup;
pub mod model;
pub mod render;

#[cfg(feature = "docx")]
pub mod docx;

#[cfg(feature = "xlsx")]
pub mod xlsx;

// Re-exports
pub use container::{OoxmlContainer, Relationship, Relationships};
pub use detect::{detect_format_from_bytes, detect_format_from_path, FormatType};
pub use error::{Error, ErrorKind, Result};
pub use model::{CellValue, Row, Sheet, Workbook};

#[cfg(feature = "xlsx")]
use std::path::PathBuf;
use std::path::Path;

/// Extract the paragraph text of a DOCX file.
///
/// # Example
///
/// ```no_run
/// let text = offex::extract_text("document.docx")?;
/// # Ok::<(), offex::Error>(())
/// ```
#[cfg(feature = "docx")]
pub fn extract_text(path: impl AsRef<Path>) -> Result<String> {
    docx::DocxParser::open(path)?.extract_text()
}

/// Extract the paragraph text of a DOCX held in memory.
#[cfg(feature = "docx")]
pub fn extract_text_from_bytes(data: &[u8]) -> Result<String> {
    docx::DocxParser::from_bytes(data.to_vec())?.extract_text()
}

/// Extract DOCX text and write it to `output`.
///
/// Nothing is written if extraction fails.
#[cfg(feature = "docx")]
pub fn export_text(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<()> {
    let text = extract_text(input)?;
    export::write_text(output, &text)
}

/// Read every worksheet of an XLSX file.
///
/// # Example
///
/// ```no_run
/// let workbook = offex::parse_workbook("data.xlsx")?;
/// println!("{:?}", workbook.sheet_names());
/// # Ok::<(), offex::Error>(())
/// ```
#[cfg(feature = "xlsx")]
pub fn parse_workbook(path: impl AsRef<Path>) -> Result<Workbook> {
    xlsx::XlsxParser::open(path)?.parse()
}

/// Read every worksheet of an XLSX held in memory.
#[cfg(feature = "xlsx")]
pub fn parse_workbook_from_bytes(data: &[u8]) -> Result<Workbook> {
    xlsx::XlsxParser::from_bytes(data.to_vec())?.parse()
}

/// Write each worksheet of an XLSX file to `{base}_{sheet_name}.csv`.
///
/// The whole workbook is read before any file is created. Returns the
/// paths written, in workbook order.
#[cfg(feature = "xlsx")]
pub fn export_csv(
    input: impl AsRef<Path>,
    base: impl AsRef<Path>,
    options: &render::CsvOptions,
) -> Result<Vec<PathBuf>> {
    let workbook = parse_workbook(input)?;
    export::write_sheets(&workbook, base, options)
}
