//! Error types for the offex library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for offex operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during extraction.
#[derive(Error, Debug)]
pub enum Error {
    /// The input path does not exist or cannot be opened for reading.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format could not be determined.
    #[error("Unknown file format")]
    UnknownFormat,

    /// Error reading ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// A required package part is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// Invalid or malformed data in the document.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error while rendering output.
    #[error("Render error: {0}")]
    Render(String),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input path missing or unreadable.
    NotFound,
    /// Not a valid package, or an expected part is missing.
    Format,
    /// A part is not well-formed XML.
    Parse,
    /// Reading or writing failed.
    Io,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Io(_) | Error::Render(_) => ErrorKind::Io,
            Error::UnknownFormat
            | Error::ZipArchive(_)
            | Error::MissingComponent(_)
            | Error::InvalidData(_) => ErrorKind::Format,
            Error::XmlParse(_) => ErrorKind::Parse,
        }
    }

    /// Map an error from opening an input file, turning "not found" and
    /// "permission denied" into [`Error::NotFound`].
    pub(crate) fn from_open(err: io::Error, path: impl Into<PathBuf>) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                Error::NotFound(path.into())
            }
            _ => Error::Io(err),
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::ZipArchive(e.to_string()),
            zip::result::ZipError::FileNotFound => {
                Error::MissingComponent("archive entry".to_string())
            }
            other => Error::ZipArchive(other.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<quick_xml::escape::EscapeError> for Error {
    fn from(err: quick_xml::escape::EscapeError) -> Self {
        Error::XmlParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownFormat;
        assert_eq!(err.to_string(), "Unknown file format");

        let err = Error::MissingComponent("word/document.xml".to_string());
        assert_eq!(err.to_string(), "Missing component: word/document.xml");

        let err = Error::NotFound(PathBuf::from("missing.docx"));
        assert_eq!(err.to_string(), "File not found: missing.docx");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::Other, "disk full");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_from_open_maps_not_found() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let err = Error::from_open(io_err, "a.docx");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(Error::ZipArchive("bad".into()).kind(), ErrorKind::Format);
        assert_eq!(Error::MissingComponent("x".into()).kind(), ErrorKind::Format);
        assert_eq!(Error::UnknownFormat.kind(), ErrorKind::Format);
        assert_eq!(Error::XmlParse("bad".into()).kind(), ErrorKind::Parse);
    }
}
