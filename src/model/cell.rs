//! Cell value model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The value stored in a worksheet cell.
///
/// Only the value is kept: no formatting, no formula text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum CellValue {
    /// No value (blank cell, styled-only cell, or formula without a cached result)
    #[default]
    Empty,
    /// String value
    Text(String),
    /// Whole number
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Boolean
    Bool(bool),
    /// Date-formatted number, rendered as ISO 8601
    DateTime(String),
    /// Error literal such as `#DIV/0!`
    Error(String),
}

impl CellValue {
    /// Parse a numeric literal as stored in a worksheet.
    ///
    /// Literals without a fraction or exponent become [`CellValue::Int`].
    pub fn from_number(literal: &str) -> Option<Self> {
        let literal = literal.trim();
        if literal.is_empty() {
            return None;
        }
        if !literal.contains(['.', 'e', 'E']) {
            if let Ok(n) = literal.parse::<i64>() {
                return Some(CellValue::Int(n));
            }
        }
        literal.parse::<f64>().ok().map(CellValue::Float)
    }

    /// Whether the cell holds no value.
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Numeric value, if any.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(n) => Some(*n as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) | CellValue::DateTime(s) | CellValue::Error(s) => f.write_str(s),
            CellValue::Int(n) => write!(f, "{}", n),
            CellValue::Float(x) => write!(f, "{}", x),
            CellValue::Bool(true) => f.write_str("TRUE"),
            CellValue::Bool(false) => f.write_str("FALSE"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Int(n)
    }
}

impl From<f64> for CellValue {
    fn from(x: f64) -> Self {
        CellValue::Float(x)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}
