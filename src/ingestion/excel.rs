//! Spreadsheet reader built on `calamine`.
//!
//! Only the first sheet of a workbook is read. Rows are yielded in sheet order with their absolute
//! zero-based row numbers; rows with no non-empty cell are not physically present and are skipped.

use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};

use crate::error::{UploadError, UploadResult};
use crate::types::{Cell, RawRow};

/// The first sheet of an opened workbook.
#[derive(Debug, Clone)]
pub struct Sheet {
    range: Range<Data>,
}

impl Sheet {
    /// Open the first sheet of a workbook held in memory (`.xlsx`, `.xls`, `.xlsb`, `.ods`).
    ///
    /// Fails with [`UploadError::Format`] when the bytes are not a spreadsheet and with
    /// [`UploadError::Read`] when the workbook has no readable first sheet.
    pub fn from_bytes(bytes: &[u8]) -> UploadResult<Self> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| UploadError::Read {
                message: "workbook has no sheets".to_string(),
            })?
            .map_err(|e| UploadError::Read {
                message: format!("failed to read first sheet: {e}"),
            })?;

        Ok(Self { range })
    }

    /// Read `path` fully into memory and open its first sheet.
    pub fn from_path(path: impl AsRef<Path>) -> UploadResult<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Iterate the sheet's rows from row 0.
    pub fn rows(&self) -> SheetRows<'_> {
        SheetRows {
            range: &self.range,
            next: 0,
        }
    }

    /// Number of physically present rows.
    pub fn row_count(&self) -> usize {
        self.rows().count()
    }
}

/// Iterator over the rows of a [`Sheet`].
#[derive(Debug)]
pub struct SheetRows<'a> {
    range: &'a Range<Data>,
    next: u32,
}

impl Iterator for SheetRows<'_> {
    type Item = RawRow;

    fn next(&mut self) -> Option<RawRow> {
        // `Range` positions are absolute; a sheet whose data starts at C5 has `start() == (4, 2)`.
        let (_, end) = self.range.start().zip(self.range.end())?;
        let width = end.1 + 1;

        while self.next <= end.0 {
            let row = self.next;
            self.next += 1;

            let cells: Vec<Cell> = (0..width)
                .map(|col| {
                    self.range
                        .get_value((row, col))
                        .map(convert_cell)
                        .unwrap_or(Cell::Blank)
                })
                .collect();

            if cells.iter().any(|c| !matches!(c, Cell::Blank)) {
                return Some(RawRow::new(row as usize, cells));
            }
        }
        None
    }
}

fn convert_cell(c: &Data) -> Cell {
    match c {
        Data::Empty => Cell::Blank,
        Data::Int(i) => Cell::Numeric(*i as f64),
        Data::Float(f) => Cell::Numeric(*f),
        Data::DateTime(dt) => Cell::Numeric(dt.as_f64()),
        Data::String(s) => Cell::Text(s.clone()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Boolean(*b),
        Data::Error(e) => Cell::Error(e.to_string()),
    }
}
