//! XLSX number format lookup for date detection.

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;

/// Days between the 1900 and 1904 date systems.
const DATE1904_OFFSET: f64 = 1462.0;

/// Serial of 9999-12-31, the last date Excel represents.
const MAX_SERIAL: i64 = 2_958_465;

/// Number format information parsed from xl/styles.xml.
#[derive(Debug, Default)]
pub struct Styles {
    /// Custom number formats: numFmtId -> formatCode
    num_fmts: HashMap<u32, String>,
    /// Cell formats: style index -> numFmtId
    cell_xfs: Vec<u32>,
}

impl Styles {
    /// Parse styles from xl/styles.xml content.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut styles = Self::default();
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut in_num_fmts = false;
        let mut in_cell_xfs = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                    b"numFmts" => in_num_fmts = true,
                    b"cellXfs" => in_cell_xfs = true,
                    b"numFmt" if in_num_fmts => styles.add_num_fmt(e)?,
                    b"xf" if in_cell_xfs => styles.cell_xfs.push(num_fmt_id(e)?.unwrap_or(0)),
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                    b"numFmt" if in_num_fmts => styles.add_num_fmt(e)?,
                    b"xf" if in_cell_xfs => styles.cell_xfs.push(num_fmt_id(e)?.unwrap_or(0)),
                    _ => {}
                },
                Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                    b"numFmts" => in_num_fmts = false,
                    b"cellXfs" => in_cell_xfs = false,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(styles)
    }

    fn add_num_fmt(&mut self, e: &BytesStart<'_>) -> Result<()> {
        let mut id = None;
        let mut format_code = String::new();
        for attr in e.attributes() {
            let attr = attr?;
            match attr.key.as_ref() {
                b"numFmtId" => id = attr.unescape_value()?.parse().ok(),
                b"formatCode" => format_code = attr.unescape_value()?.into_owned(),
                _ => {}
            }
        }
        if let Some(id) = id {
            self.num_fmts.insert(id, format_code);
        }
        Ok(())
    }

    /// Get the numFmtId for a cell style index.
    pub fn get_num_fmt_id(&self, style_index: usize) -> Option<u32> {
        self.cell_xfs.get(style_index).copied()
    }

    /// Whether the cell style at `style_index` formats numbers as dates.
    pub fn is_date_style(&self, style_index: usize) -> bool {
        self.get_num_fmt_id(style_index)
            .is_some_and(|id| self.is_date_format(id))
    }

    /// Check if a numFmtId represents a date or time format.
    pub fn is_date_format(&self, num_fmt_id: u32) -> bool {
        // Built-in: 14-22 dates, 45-47 times
        if (14..=22).contains(&num_fmt_id) || (45..=47).contains(&num_fmt_id) {
            return true;
        }

        self.num_fmts
            .get(&num_fmt_id)
            .is_some_and(|code| Self::is_date_format_code(code))
    }

    /// Check if a format code string represents a date or time format.
    ///
    /// Sections in square brackets (`[Red]`, `[$-409]`) and quoted literals
    /// are ignored.
    fn is_date_format_code(format_code: &str) -> bool {
        let mut in_bracket = false;
        let mut in_quote = false;
        let mut escaped = false;
        let lower_format = format_code.to_lowercase();

        for c in lower_format.chars() {
            if escaped {
                escaped = false;
                continue;
            }
            match c {
                '\\' if !in_quote => escaped = true,
                '[' if !in_quote => in_bracket = true,
                ']' if !in_quote => in_bracket = false,
                '"' => in_quote = !in_quote,
                _ if in_bracket || in_quote => {}
                'd' | 'y' | 'h' | 's' => return true,
                // 'm' is month next to d/y, minute next to h/s; both are temporal
                'm' => return true,
                _ => {}
            }
        }

        false
    }

    /// Convert an Excel serial number to an ISO 8601 string.
    ///
    /// Serials below 1 are times of day (`12:00:00`). With `date1904` the
    /// serial counts from 1904-01-01. Serials past 9999-12-31 have no date.
    pub fn serial_to_date(serial: f64, date1904: bool) -> Option<String> {
        if !serial.is_finite() || serial < 0.0 {
            return None;
        }

        let serial = if date1904 {
            serial + DATE1904_OFFSET
        } else {
            serial
        };
        if serial >= (MAX_SERIAL + 1) as f64 {
            return None;
        }

        let mut days = serial.floor() as i64;
        let mut seconds = ((serial - serial.floor()) * 86_400.0).round() as u32;
        if seconds >= 86_400 {
            days += 1;
            seconds -= 86_400;
        }
        if days > MAX_SERIAL {
            return None;
        }

        let time = (seconds > 0).then(|| {
            format!(
                "{:02}:{:02}:{:02}",
                seconds / 3600,
                (seconds % 3600) / 60,
                seconds % 60
            )
        });

        if days < 1 {
            return Some(time.unwrap_or_else(|| "00:00:00".to_string()));
        }

        // Excel treats 1900 as a leap year: serial 60 is 1900-02-29, which
        // never existed, and every later serial is one day ahead.
        let date = if days == 60 {
            "1900-02-29".to_string()
        } else {
            let (year, month, day) = days_to_ymd(if days > 60 { days - 1 } else { days });
            format!("{:04}-{:02}-{:02}", year, month, day)
        };

        Some(match time {
            Some(time) => format!("{}T{}", date, time),
            None => date,
        })
    }
}

fn num_fmt_id(e: &BytesStart<'_>) -> Result<Option<u32>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"numFmtId" {
            return Ok(attr.unescape_value()?.parse().ok());
        }
    }
    Ok(None)
}

/// Convert days since 1899-12-31 (day 1 is 1900-01-01) to (year, month, day).
fn days_to_ymd(days: i64) -> (i64, u32, u32) {
    // Shift to days since 0000-03-01 and split into 400-year eras
    let z = days - 25_568 + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}
