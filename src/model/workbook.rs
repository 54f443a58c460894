//! Workbook model structures.

use super::CellValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A row of cell values, left to right.
pub type Row = Vec<CellValue>;

static EMPTY: CellValue = CellValue::Empty;

/// A single worksheet grid.
///
/// Only rows holding cells are stored, each up to its last cell. The grid
/// is `row_count() x column_count()`; every other position is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet name as shown on its tab
    pub name: String,

    /// Stored rows keyed by zero-based index
    #[serde(default)]
    cells: BTreeMap<usize, Row>,

    #[serde(default)]
    height: usize,

    #[serde(default)]
    width: usize,
}

impl Sheet {
    /// Create an empty sheet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create a sheet from dense rows; the extent is the widest row.
    pub fn from_rows<R, C>(name: impl Into<String>, rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<CellValue>,
    {
        let mut sheet = Self::new(name);
        for (r, row) in rows.into_iter().enumerate() {
            sheet.extend_to(r + 1, 0);
            for (c, value) in row.into_iter().enumerate() {
                sheet.set(r, c, value.into());
            }
        }
        sheet
    }

    /// Store a value at a zero-based position, growing the extent to cover it.
    pub fn set(&mut self, row: usize, col: usize, value: CellValue) {
        self.extend_to(row + 1, col + 1);
        let cells = self.cells.entry(row).or_default();
        if cells.len() <= col {
            cells.resize(col + 1, CellValue::Empty);
        }
        cells[col] = value;
    }

    /// Grow the extent to at least `height` rows and `width` columns.
    pub fn extend_to(&mut self, height: usize, width: usize) {
        self.height = self.height.max(height);
        self.width = self.width.max(width);
    }

    /// Value at a zero-based position; `Empty` outside stored cells.
    pub fn get(&self, row: usize, col: usize) -> &CellValue {
        self.cells
            .get(&row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&EMPTY)
    }

    /// One row padded to the column extent.
    pub fn row(&self, index: usize) -> Row {
        let mut row = self.cells.get(&index).cloned().unwrap_or_default();
        row.resize(self.width, CellValue::Empty);
        row
    }

    /// Every row top to bottom, each padded to the column extent.
    ///
    /// Rows are built one at a time.
    pub fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        (0..self.height).map(move |i| self.row(i))
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.height
    }

    /// Column extent of the sheet.
    pub fn column_count(&self) -> usize {
        self.width
    }

    /// Whether the sheet has no rows.
    pub fn is_empty(&self) -> bool {
        self.height == 0
    }
}

/// An ordered collection of sheets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    /// Sheets in the order the workbook defines them
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Create an empty workbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet.
    pub fn add_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Find a sheet by name.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}
