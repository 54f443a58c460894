//! XLSX parser implementation.

use crate::container::{OoxmlContainer, Relationships};
use crate::error::{Error, Result};
use crate::model::{CellValue, Sheet, Workbook};
use quick_xml::events::{BytesStart, Event};
use std::path::Path;

use super::reference::CellRef;
use super::shared_strings::SharedStrings;
use super::styles::Styles;

/// Package path of the workbook part.
pub const WORKBOOK_PART: &str = "xl/workbook.xml";

/// Sheet entry from workbook.xml.
#[derive(Debug, Clone)]
struct SheetInfo {
    name: String,
    rel_id: String,
}

/// Parser for XLSX (Excel) workbooks.
pub struct XlsxParser {
    container: OoxmlContainer,
    shared_strings: SharedStrings,
    styles: Styles,
    sheets: Vec<SheetInfo>,
    relationships: Relationships,
    date1904: bool,
}

impl XlsxParser {
    /// Open an XLSX file for parsing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let container = OoxmlContainer::open(path)?;
        Self::from_container(container)
    }

    /// Create a parser from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let container = OoxmlContainer::from_bytes(data)?;
        Self::from_container(container)
    }

    /// Create a parser from an already opened container.
    ///
    /// Fails with [`Error::MissingComponent`] when the package has no
    /// workbook part.
    pub fn from_container(container: OoxmlContainer) -> Result<Self> {
        let workbook_xml = container.read_xml(WORKBOOK_PART)?;
        let (sheets, date1904) = Self::parse_workbook(&workbook_xml)?;

        let relationships = container.read_relationships(WORKBOOK_PART)?;

        let shared_strings = match container.read_optional_xml("xl/sharedStrings.xml")? {
            Some(xml) => SharedStrings::parse(&xml)?,
            None => SharedStrings::default(),
        };

        let styles = match container.read_optional_xml("xl/styles.xml")? {
            Some(xml) => Styles::parse(&xml)?,
            None => Styles::default(),
        };

        log::debug!(
            "workbook: {} sheets, {} shared strings, date1904={}",
            sheets.len(),
            shared_strings.len(),
            date1904
        );

        Ok(Self {
            container,
            shared_strings,
            styles,
            sheets,
            relationships,
            date1904,
        })
    }

    /// Parse workbook.xml for sheet entries and the date system.
    fn parse_workbook(xml: &str) -> Result<(Vec<SheetInfo>, bool)> {
        let mut sheets = Vec::new();
        let mut date1904 = false;
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    match e.local_name().as_ref() {
                        b"sheet" => {
                            let mut name = String::new();
                            let mut rel_id = String::new();

                            for attr in e.attributes() {
                                let attr = attr?;
                                match attr.key.local_name().as_ref() {
                                    b"name" if attr.key.prefix().is_none() => {
                                        name = attr.unescape_value()?.into_owned();
                                    }
                                    b"id" if attr.key.prefix().is_some() => {
                                        rel_id = attr.unescape_value()?.into_owned();
                                    }
                                    _ => {}
                                }
                            }

                            if name.is_empty() {
                                return Err(Error::InvalidData(
                                    "sheet entry without a name".to_string(),
                                ));
                            }
                            sheets.push(SheetInfo { name, rel_id });
                        }
                        b"workbookPr" => {
                            for attr in e.attributes() {
                                let attr = attr?;
                                if attr.key.as_ref() == b"date1904" {
                                    let value = attr.unescape_value()?;
                                    date1904 = value == "1" || value == "true";
                                }
                            }
                        }
                        _ => {}
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok((sheets, date1904))
    }

    /// Parse every worksheet, in workbook order.
    ///
    /// Chartsheets and other sheet kinds without a cell grid are skipped.
    pub fn parse(&self) -> Result<Workbook> {
        let mut workbook = Workbook::new();

        for info in &self.sheets {
            let rel = self.relationships.get(&info.rel_id).ok_or_else(|| {
                Error::InvalidData(format!(
                    "sheet '{}' refers to unknown relationship '{}'",
                    info.name, info.rel_id
                ))
            })?;

            if !rel.rel_type.ends_with("/worksheet") {
                log::warn!(
                    "skipping sheet '{}': not a worksheet ({})",
                    info.name,
                    rel.rel_type
                );
                continue;
            }

            let sheet_path = OoxmlContainer::resolve_path(WORKBOOK_PART, &rel.target);
            let xml = self.container.read_xml(&sheet_path)?;
            let sheet = self.parse_sheet(&info.name, &xml)?;
            log::debug!(
                "sheet '{}' ({}): {} rows x {} columns",
                sheet.name,
                sheet_path,
                sheet.row_count(),
                sheet.column_count()
            );
            workbook.add_sheet(sheet);
        }

        Ok(workbook)
    }

    /// Parse a worksheet XML into a dense grid.
    ///
    /// The grid spans rows `1..=max_row` and columns `1..=max_col` over every
    /// `c` element present, value-less ones included.
    fn parse_sheet(&self, name: &str, xml: &str) -> Result<Sheet> {
        let mut reader = quick_xml::Reader::from_str(xml);
        let mut buf = Vec::new();

        let mut cells: Vec<(CellRef, CellValue)> = Vec::new();
        let mut row_index: u32 = 0;
        let mut col_index: u32 = 0;
        let mut cell: Option<PendingCell> = None;
        let mut capture = Capture::None;
        let mut phonetic_depth = 0usize;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                    b"row" => {
                        row_index = row_number(e, row_index)?;
                        col_index = 0;
                    }
                    b"c" => {
                        let pending = PendingCell::start(e, row_index, col_index)?;
                        row_index = pending.position.row;
                        col_index = pending.position.col;
                        cell = Some(pending);
                    }
                    b"v" if cell.is_some() => capture = Capture::Value,
                    b"f" if cell.is_some() => {
                        if let Some(c) = cell.as_mut() {
                            c.has_formula = true;
                        }
                    }
                    b"rPh" if cell.is_some() => phonetic_depth += 1,
                    b"t" if cell.is_some() && phonetic_depth == 0 => {
                        capture = Capture::Inline;
                        if let Some(c) = cell.as_mut() {
                            c.inline.get_or_insert_with(String::new);
                        }
                    }
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                    b"row" => {
                        row_index = row_number(e, row_index)?;
                        col_index = 0;
                    }
                    b"c" => {
                        let pending = PendingCell::start(e, row_index, col_index)?;
                        row_index = pending.position.row;
                        col_index = pending.position.col;
                        cells.push((pending.position, CellValue::Empty));
                    }
                    b"f" if cell.is_some() => {
                        if let Some(c) = cell.as_mut() {
                            c.has_formula = true;
                        }
                    }
                    b"t" if cell.is_some() && phonetic_depth == 0 => {
                        if let Some(c) = cell.as_mut() {
                            c.inline.get_or_insert_with(String::new);
                        }
                    }
                    _ => {}
                },
                Ok(Event::Text(ref e)) => {
                    if let Some(c) = cell.as_mut() {
                        match capture {
                            Capture::Value => {
                                c.value.get_or_insert_with(String::new).push_str(&e.unescape()?)
                            }
                            Capture::Inline => {
                                c.inline.get_or_insert_with(String::new).push_str(&e.unescape()?)
                            }
                            Capture::None => {}
                        }
                    }
                }
                Ok(Event::CData(ref e)) => {
                    if let Some(c) = cell.as_mut() {
                        let text = String::from_utf8_lossy(e);
                        match capture {
                            Capture::Value => c.value.get_or_insert_with(String::new).push_str(&text),
                            Capture::Inline => c.inline.get_or_insert_with(String::new).push_str(&text),
                            Capture::None => {}
                        }
                    }
                }
                Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                    b"c" => {
                        if let Some(pending) = cell.take() {
                            let value = self.resolve_cell_value(&pending)?;
                            cells.push((pending.position, value));
                        }
                        capture = Capture::None;
                        phonetic_depth = 0;
                    }
                    b"v" | b"t" => capture = Capture::None,
                    b"rPh" if phonetic_depth > 0 => phonetic_depth -= 1,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(build_grid(name, cells))
    }

    /// Resolve a cell's stored value based on its type attribute.
    ///
    /// Formulas are never evaluated: the cached `v` is used, and a formula
    /// without one is empty.
    fn resolve_cell_value(&self, cell: &PendingCell) -> Result<CellValue> {
        if cell.cell_type.as_deref() == Some("inlineStr") {
            return Ok(cell.inline.clone().map_or(CellValue::Empty, CellValue::Text));
        }

        let Some(raw) = cell.value.as_deref() else {
            if cell.has_formula {
                log::debug!(
                    "formula cell R{}C{} has no cached value",
                    cell.position.row,
                    cell.position.col
                );
            }
            return Ok(CellValue::Empty);
        };

        let value = match cell.cell_type.as_deref() {
            Some("s") => {
                let idx: usize = raw.trim().parse().map_err(|_| {
                    Error::InvalidData(format!("invalid shared string index '{}'", raw))
                })?;
                let text = self.shared_strings.get(idx).ok_or_else(|| {
                    Error::InvalidData(format!("shared string index {} out of range", idx))
                })?;
                CellValue::Text(text.to_string())
            }
            Some("b") => match raw.trim() {
                "1" | "true" => CellValue::Bool(true),
                "0" | "false" => CellValue::Bool(false),
                other => {
                    return Err(Error::InvalidData(format!("invalid boolean '{}'", other)));
                }
            },
            Some("e") => CellValue::Error(raw.to_string()),
            Some("str") => CellValue::Text(raw.to_string()),
            Some("d") => CellValue::DateTime(raw.trim().to_string()),
            _ if raw.trim().is_empty() => CellValue::Empty,
            _ => {
                let number = CellValue::from_number(raw).ok_or_else(|| {
                    Error::InvalidData(format!("invalid number '{}'", raw))
                })?;
                self.apply_date_style(number, cell.style)
            }
        };

        Ok(value)
    }

    /// Render date-formatted numbers as ISO 8601.
    fn apply_date_style(&self, number: CellValue, style: Option<usize>) -> CellValue {
        let is_date = style.is_some_and(|s| self.styles.is_date_style(s));
        if !is_date {
            return number;
        }
        number
            .as_f64()
            .and_then(|serial| Styles::serial_to_date(serial, self.date1904))
            .map_or(number, CellValue::DateTime)
    }

    /// Get a reference to the container.
    pub fn container(&self) -> &OoxmlContainer {
        &self.container
    }

    /// Get the number of sheets declared by the workbook.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Get sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Which text a worksheet reader is currently collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    None,
    Value,
    Inline,
}

/// A `c` element being read.
#[derive(Debug)]
struct PendingCell {
    position: CellRef,
    cell_type: Option<String>,
    style: Option<usize>,
    value: Option<String>,
    inline: Option<String>,
    has_formula: bool,
}

impl PendingCell {
    /// Read the attributes of a `c` element.
    ///
    /// Without an `r` attribute the cell follows the previous one.
    fn start(e: &BytesStart<'_>, row: u32, prev_col: u32) -> Result<Self> {
        let mut position = None;
        let mut cell_type = None;
        let mut style = None;

        for attr in e.attributes() {
            let attr = attr?;
            let value = attr.unescape_value()?;
            match attr.key.as_ref() {
                b"r" => {
                    position = Some(CellRef::parse(&value).ok_or_else(|| {
                        Error::InvalidData(format!("invalid cell reference '{}'", value))
                    })?);
                }
                b"t" => cell_type = Some(value.into_owned()),
                b"s" => style = value.trim().parse().ok(),
                _ => {}
            }
        }

        let position = position.unwrap_or(CellRef {
            row: row.max(1),
            col: prev_col + 1,
        });

        Ok(Self {
            position,
            cell_type,
            style,
            value: None,
            inline: None,
            has_formula: false,
        })
    }
}

/// Row number of a `row` element; without `r` it follows the previous row.
fn row_number(e: &BytesStart<'_>, prev_row: u32) -> Result<u32> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"r" {
            let value = attr.unescape_value()?;
            return value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|r| *r >= 1)
                .ok_or_else(|| Error::InvalidData(format!("invalid row number '{}'", value)));
        }
    }
    Ok(prev_row + 1)
}

/// Place cells on a sheet grid.
///
/// The extent covers every cell read, value-less ones included; positions
/// in between stay empty without being stored.
fn build_grid(name: &str, cells: Vec<(CellRef, CellValue)>) -> Sheet {
    let mut sheet = Sheet::new(name);
    for (pos, value) in cells {
        sheet.set(pos.row as usize - 1, pos.col as usize - 1, value);
    }
    sheet
}
