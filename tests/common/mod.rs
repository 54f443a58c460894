//! Synthetic OOXML packages for integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

fn zip_parts(parts: &[(&str, String)]) -> Vec<u8> {
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        for (name, content) in parts {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }
    buffer
}

/// A DOCX whose body is `body` (raw WordprocessingML).
pub fn docx_with_body(body: &str) -> Vec<u8> {
    zip_parts(&[
        (
            "[Content_Types].xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#
                .to_string(),
        ),
        (
            "_rels/.rels",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#
                .to_string(),
        ),
        (
            "word/document.xml",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{}"><w:body>{}</w:body></w:document>"#,
                WORDML_NS, body
            ),
        ),
    ])
}

/// A DOCX with one paragraph per entry; `None` is a paragraph without runs.
pub fn docx_with_paragraphs(paragraphs: &[Option<&str>]) -> Vec<u8> {
    let mut body = String::new();
    for p in paragraphs {
        match p {
            Some(text) => body.push_str(&format!(
                r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
                text
            )),
            None => body.push_str("<w:p><w:pPr><w:spacing w:after=\"0\"/></w:pPr></w:p>"),
        }
    }
    docx_with_body(&body)
}

/// A DOCX package with an arbitrary `word/document.xml`.
pub fn docx_with_document_xml(xml: &str) -> Vec<u8> {
    zip_parts(&[("word/document.xml", xml.to_string())])
}

/// A ZIP that is not an Office package.
pub fn zip_without_parts() -> Vec<u8> {
    zip_parts(&[("readme.txt", "hello".to_string())])
}

/// A worksheet given as raw `sheetData` content.
pub struct TestSheet<'a> {
    pub name: &'a str,
    pub sheet_data: String,
}

/// An XLSX with the given sheets, shared strings and cell formats.
///
/// `cell_num_fmts` lists the numFmtId of each cellXfs entry.
pub fn xlsx_with(sheets: &[TestSheet<'_>], shared: &[&str], cell_num_fmts: &[u32]) -> Vec<u8> {
    let mut parts: Vec<(&str, String)> = Vec::new();

    parts.push((
        "[Content_Types].xml",
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
</Types>"#
            .to_string(),
    ));

    let mut workbook = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>"#,
    );
    let mut rels = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (i, sheet) in sheets.iter().enumerate() {
        workbook.push_str(&format!(
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            sheet.name,
            i + 1,
            i + 1
        ));
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
            i + 1,
            i + 1
        ));
    }
    workbook.push_str("</sheets></workbook>");
    rels.push_str("</Relationships>");
    parts.push(("xl/workbook.xml", workbook));
    parts.push(("xl/_rels/workbook.xml.rels", rels));

    if !shared.is_empty() {
        let mut sst = String::from(
            r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );
        for s in shared {
            sst.push_str(&format!(r#"<si><t xml:space="preserve">{}</t></si>"#, s));
        }
        sst.push_str("</sst>");
        parts.push(("xl/sharedStrings.xml", sst));
    }

    if !cell_num_fmts.is_empty() {
        let mut styles = String::from(
            r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><cellXfs>"#,
        );
        for id in cell_num_fmts {
            styles.push_str(&format!(r#"<xf numFmtId="{}"/>"#, id));
        }
        styles.push_str("</cellXfs></styleSheet>");
        parts.push(("xl/styles.xml", styles));
    }

    let sheet_names: Vec<String> = (1..=sheets.len())
        .map(|i| format!("xl/worksheets/sheet{}.xml", i))
        .collect();
    for (sheet, path) in sheets.iter().zip(&sheet_names) {
        parts.push((
            path.as_str(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
                sheet.sheet_data
            ),
        ));
    }

    zip_parts(&parts)
}
