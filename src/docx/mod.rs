//! DOCX (Word) text extraction.
//!
//! Reads `word/document.xml`, collects every paragraph in reading order and
//! joins the non-empty ones with newlines.
//!
//! # Example
//!
//! ```no_run
//! use offex::docx::DocxParser;
//!
//! let parser = DocxParser::open("report.docx")?;
//! println!("{}", parser.extract_text()?);
//! # Ok::<(), offex::Error>(())
//! ```

mod parser;

pub use parser::{
    extract_text_from_xml, join_paragraphs, paragraphs, DocxParser, DOCUMENT_PART, WORDML_NS,
};
