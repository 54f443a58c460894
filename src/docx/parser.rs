//! DOCX parser implementation.

use crate::container::OoxmlContainer;
use crate::error::Result;
use crate::markup::{self, Element};
use std::path::Path;

/// Namespace of WordprocessingML elements.
pub const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Package path of the main document part.
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Parser for DOCX (Word) documents.
pub struct DocxParser {
    container: OoxmlContainer,
}

impl DocxParser {
    /// Open a DOCX file for parsing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let container = OoxmlContainer::open(path)?;
        Ok(Self::from_container(container))
    }

    /// Create a parser from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let container = OoxmlContainer::from_bytes(data)?;
        Ok(Self::from_container(container))
    }

    /// Create a parser from an already opened container.
    pub fn from_container(container: OoxmlContainer) -> Self {
        Self { container }
    }

    /// Non-empty paragraph texts in reading order.
    pub fn paragraphs(&self) -> Result<Vec<String>> {
        let xml = self.container.read_xml(DOCUMENT_PART)?;
        let root = markup::parse(&xml)?;
        let paragraphs = paragraphs(&root);
        log::debug!("{}: {} non-empty paragraphs", DOCUMENT_PART, paragraphs.len());
        Ok(paragraphs)
    }

    /// Paragraph text joined with newlines.
    pub fn extract_text(&self) -> Result<String> {
        Ok(join_paragraphs(&self.paragraphs()?))
    }

    /// Get a reference to the container.
    pub fn container(&self) -> &OoxmlContainer {
        &self.container
    }
}

/// Collect the text of every paragraph below `root`.
///
/// Paragraphs are found at any depth (inside tables, text boxes, content
/// controls). Each paragraph's text is the concatenation of every `w:t`
/// below it; paragraphs whose text is empty are dropped.
pub fn paragraphs(root: &Element) -> Vec<String> {
    root.find_all(WORDML_NS, "p")
        .filter_map(|p| {
            let text: String = p.find_all(WORDML_NS, "t").map(|t| t.text()).collect();
            (!text.is_empty()).then_some(text)
        })
        .collect()
}

/// Join paragraphs with a single newline, without a trailing one.
pub fn join_paragraphs(paragraphs: &[String]) -> String {
    paragraphs.join("\n")
}

/// Parse `word/document.xml` content and return its joined paragraph text.
pub fn extract_text_from_xml(xml: &str) -> Result<String> {
    let root = markup::parse(xml)?;
    Ok(join_paragraphs(&paragraphs(&root)))
}
