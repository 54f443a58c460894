//! End-to-end XLSX to CSV extraction on synthetic packages.

mod common;

use common::{xlsx_with, zip_without_parts, TestSheet};
use offex::render::{to_csv, CsvOptions, LineEnding};
use offex::{parse_workbook_from_bytes, CellValue, ErrorKind};

fn data_sheet() -> TestSheet<'static> {
    TestSheet {
        name: "Data",
        sheet_data: r#"<row r="1"><c r="A1"><v>1</v></c><c r="B1" t="s"><v>0</v></c><c r="C1" s="0"/></row>
<row r="2"><c r="A2" t="s"><v>1</v></c><c r="B2"><v>2</v></c><c r="C2"><v>3</v></c></row>"#
            .to_string(),
    }
}

/// Read CSV output back with a conforming reader.
fn read_csv(text: &str) -> Vec<Vec<String>> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes())
        .records()
        .map(|record| record.unwrap().iter().map(str::to_string).collect())
        .collect()
}

#[test]
fn data_sheet_writes_two_records() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("book.xlsx");
    std::fs::write(&input, xlsx_with(&[data_sheet()], &["a", "b"], &[0])).unwrap();

    let base = dir.path().join("base");
    let written = offex::export_csv(&input, &base, &CsvOptions::default()).unwrap();

    assert_eq!(written, vec![dir.path().join("base_Data.csv")]);
    let csv = std::fs::read_to_string(&written[0]).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines, vec!["1,a,", "b,2,3"]);
}

#[test]
fn sheets_in_workbook_order_one_file_each() {
    let sheets = [
        TestSheet {
            name: "Zulu",
            sheet_data: r#"<row r="1"><c r="A1"><v>1</v></c></row>"#.to_string(),
        },
        TestSheet {
            name: "Alpha",
            sheet_data: r#"<row r="1"><c r="A1"><v>2</v></c></row>"#.to_string(),
        },
    ];
    let data = xlsx_with(&sheets, &[], &[]);
    let workbook = parse_workbook_from_bytes(&data).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["Zulu", "Alpha"]);

    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("out");
    let written = offex::export::write_sheets(&workbook, &base, &CsvOptions::default()).unwrap();
    assert_eq!(
        written,
        vec![dir.path().join("out_Zulu.csv"), dir.path().join("out_Alpha.csv")]
    );
}

#[test]
fn row_and_column_counts_follow_extent() {
    let sheet = TestSheet {
        name: "Sparse",
        sheet_data: r#"<row r="2"><c r="B2"><v>5</v></c></row>
<row r="4"><c r="A4"><v>6</v></c><c r="E4" s="0"/></row>"#
            .to_string(),
    };
    let workbook = parse_workbook_from_bytes(&xlsx_with(&[sheet], &[], &[0])).unwrap();
    let sheet = &workbook.sheets[0];

    assert_eq!(sheet.row_count(), 4);
    assert!(sheet.rows().all(|r| r.len() == 5));

    let records = read_csv(&to_csv(sheet, &CsvOptions::default()));
    assert_eq!(records.len(), 4);
    assert!(records.iter().all(|r| r.len() == 5));
    assert_eq!(records[1], vec!["", "5", "", "", ""]);
}

#[test]
fn csv_round_trip_preserves_values() {
    let shared = [
        "plain",
        "with, comma",
        "with &quot;quotes&quot;",
        "multi\nline",
        " padded ",
        "mid\"quote",
    ];
    let mut row = String::from(r#"<row r="1">"#);
    for (i, col) in ["A", "B", "C", "D", "E", "F"].iter().enumerate() {
        row.push_str(&format!(r#"<c r="{}1" t="s"><v>{}</v></c>"#, col, i));
    }
    row.push_str(r#"</row><row r="2"><c r="A2"><v>-1.25</v></c><c r="B2" t="b"><v>0</v></c></row>"#);

    let sheet = TestSheet {
        name: "Strings",
        sheet_data: row,
    };
    let workbook = parse_workbook_from_bytes(&xlsx_with(&[sheet], &shared, &[])).unwrap();
    let records = read_csv(&to_csv(&workbook.sheets[0], &CsvOptions::default()));

    assert_eq!(records.len(), 2);
    assert_eq!(
        records[0],
        vec![
            "plain",
            "with, comma",
            "with \"quotes\"",
            "multi\nline",
            " padded ",
            "mid\"quote",
        ]
    );
    assert_eq!(records[1], vec!["-1.25", "FALSE", "", "", "", ""]);
}

#[test]
fn single_empty_column_rows_read_back() {
    let sheet = TestSheet {
        name: "Narrow",
        sheet_data: r#"<row r="1"><c r="A1"><v>1</v></c></row><row r="3"><c r="A3"><v>3</v></c></row>"#
            .to_string(),
    };
    let workbook = parse_workbook_from_bytes(&xlsx_with(&[sheet], &[], &[])).unwrap();
    let csv = to_csv(&workbook.sheets[0], &CsvOptions::default());
    assert_eq!(csv, "1\r\n\"\"\r\n3\r\n");

    let records = read_csv(&csv);
    assert_eq!(records, vec![vec!["1"], vec![""], vec!["3"]]);
}

#[test]
fn date_formatted_cells_render_as_iso_dates() {
    let sheet = TestSheet {
        name: "Dates",
        sheet_data: r#"<row r="1"><c r="A1" s="1"><v>45658</v></c><c r="B1"><v>45658</v></c></row>"#
            .to_string(),
    };
    let workbook = parse_workbook_from_bytes(&xlsx_with(&[sheet], &[], &[0, 14])).unwrap();
    assert_eq!(
        workbook.sheets[0].row(0),
        vec![CellValue::DateTime("2025-01-01".into()), CellValue::Int(45658)]
    );
}

#[test]
fn line_ending_and_delimiter_options() {
    let workbook = parse_workbook_from_bytes(&xlsx_with(&[data_sheet()], &["a", "b"], &[0])).unwrap();
    let options = CsvOptions::new()
        .with_delimiter(';')
        .with_line_ending(LineEnding::Lf);
    assert_eq!(to_csv(&workbook.sheets[0], &options), "1;a;\nb;2;3\n");
}

#[test]
fn output_is_idempotent() {
    let data = xlsx_with(&[data_sheet()], &["a", "b"], &[0]);
    let first = to_csv(&parse_workbook_from_bytes(&data).unwrap().sheets[0], &CsvOptions::default());
    let second = to_csv(&parse_workbook_from_bytes(&data).unwrap().sheets[0], &CsvOptions::default());
    assert_eq!(first, second);
}

#[test]
fn missing_workbook_part_is_format_error() {
    let err = parse_workbook_from_bytes(&zip_without_parts()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn malformed_sheet_creates_no_files() {
    let broken = TestSheet {
        name: "Broken",
        sheet_data: r#"<row r="1"><c r="A1"><v>1</v></row>"#.to_string(),
    };
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.xlsx");
    std::fs::write(&input, xlsx_with(&[data_sheet(), broken], &["a", "b"], &[0])).unwrap();

    let base = dir.path().join("broken");
    let err = offex::export_csv(&input, &base, &CsvOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(!dir.path().join("broken_Data.csv").exists());
    assert!(!dir.path().join("broken_Broken.csv").exists());
}

#[test]
fn missing_input_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = offex::export_csv(dir.path().join("nope.xlsx"), dir.path().join("nope"), &CsvOptions::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
