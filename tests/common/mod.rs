#![allow(dead_code)]

use std::io::{Cursor, Read, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use rust_xlsxwriter::Workbook;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// A cell to write into a generated test workbook.
pub enum W {
    S(&'static str),
    N(f64),
    B(bool),
    /// Leave the cell unwritten.
    Skip,
}

pub fn tmp_file(name: &str, ext: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("bulk-upload-{name}-{nanos}.{ext}"))
}

pub fn header() -> Vec<W> {
    vec![W::S("name"), W::S("email"), W::S("age")]
}

pub fn person(name: &'static str, email: &'static str, age: f64) -> Vec<W> {
    vec![W::S(name), W::S(email), W::N(age)]
}

fn write_sheet(ws: &mut rust_xlsxwriter::Worksheet, rows: &[Vec<W>]) {
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let (r, c) = (r as u32, c as u16);
            match cell {
                W::S(s) => {
                    ws.write_string(r, c, *s).unwrap();
                }
                W::N(n) => {
                    ws.write_number(r, c, *n).unwrap();
                }
                W::B(b) => {
                    ws.write_boolean(r, c, *b).unwrap();
                }
                W::Skip => {}
            }
        }
    }
}

/// Build an `.xlsx` workbook in memory with one sheet per entry of `sheets`.
pub fn workbook(sheets: &[&[Vec<W>]]) -> Vec<u8> {
    let mut wb = Workbook::new();
    for (i, rows) in sheets.iter().enumerate() {
        let ws = wb.add_worksheet();
        ws.set_name(format!("Sheet{}", i + 1)).unwrap();
        write_sheet(ws, rows);
    }
    wb.save_to_buffer().unwrap()
}

/// Build a single-sheet `.xlsx` workbook in memory.
pub fn single_sheet(rows: &[Vec<W>]) -> Vec<u8> {
    workbook(&[rows])
}

/// Copy the `.xlsx` package in `bytes`, replacing the part stored at `part` with `content`.
pub fn replace_part(bytes: &[u8], part: &str, content: &str) -> Vec<u8> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut out = ZipWriter::new(Cursor::new(Vec::new()));
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).unwrap();
        let name = entry.name().to_string();
        let mut data = Vec::new();
        entry.read_to_end(&mut data).unwrap();
        out.start_file(name.as_str(), SimpleFileOptions::default()).unwrap();
        if name == part {
            out.write_all(content.as_bytes()).unwrap();
        } else {
            out.write_all(&data).unwrap();
        }
    }
    out.finish().unwrap().into_inner()
}

/// A single-sheet workbook whose first cell refers to a shared string that does not exist.
pub fn sheet_with_dangling_shared_string() -> Vec<u8> {
    let bytes = single_sheet(&[header()]);
    let sheet = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        r#"<sheetData><row r="1"><c r="A1" t="s"><v>999</v></c></row></sheetData>"#,
        r#"</worksheet>"#,
    );
    replace_part(&bytes, "xl/worksheets/sheet1.xml", sheet)
}
