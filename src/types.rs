//! Core data model types.
//!
//! The reader produces [`RawRow`]s made of typed [`Cell`]s; the pipeline turns each data row into
//! either a [`ValidRecord`] or a [`RejectedRecord`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RowFault;

/// Kind tag reported by a [`Cell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Missing or empty cell.
    Blank,
    /// Number (dates and times are stored as numbers too).
    Numeric,
    /// String.
    Text,
    /// Boolean.
    Boolean,
    /// Spreadsheet error value such as `#N/A`.
    Error,
}

impl CellKind {
    fn label(self) -> &'static str {
        match self {
            Self::Blank => "blank",
            Self::Numeric => "numeric",
            Self::Text => "text",
            Self::Boolean => "boolean",
            Self::Error => "error",
        }
    }
}

/// A single typed spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Missing/empty value.
    Blank,
    /// 64-bit float.
    Numeric(f64),
    /// UTF-8 string.
    Text(String),
    /// Boolean.
    Boolean(bool),
    /// Error value, rendered the way the spreadsheet shows it (e.g. `#DIV/0!`).
    Error(String),
}

/// Shared blank cell handed out for missing columns.
static BLANK: Cell = Cell::Blank;

impl Cell {
    /// The kind tag of this cell.
    pub fn kind(&self) -> CellKind {
        match self {
            Self::Blank => CellKind::Blank,
            Self::Numeric(_) => CellKind::Numeric,
            Self::Text(_) => CellKind::Text,
            Self::Boolean(_) => CellKind::Boolean,
            Self::Error(_) => CellKind::Error,
        }
    }

    /// Read the cell as a string.
    ///
    /// Blank cells read as `""`. Any other non-text cell is a [`RowFault`].
    pub fn string_value(&self) -> Result<String, RowFault> {
        match self {
            Self::Blank => Ok(String::new()),
            Self::Text(s) => Ok(s.clone()),
            Self::Error(e) => Err(RowFault::ErrorCell(e.clone())),
            other => Err(RowFault::TypeMismatch {
                expected: CellKind::Text.label(),
                found: other.kind().label(),
            }),
        }
    }

    /// Read the cell as a number.
    ///
    /// Blank cells read as `0.0`. Any other non-numeric cell is a [`RowFault`].
    pub fn numeric_value(&self) -> Result<f64, RowFault> {
        match self {
            Self::Blank => Ok(0.0),
            Self::Numeric(v) => Ok(*v),
            Self::Error(e) => Err(RowFault::ErrorCell(e.clone())),
            other => Err(RowFault::TypeMismatch {
                expected: CellKind::Numeric.label(),
                found: other.kind().label(),
            }),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => Ok(()),
            Self::Numeric(v) => write!(f, "{v:?}"),
            Self::Text(s) => f.write_str(s),
            Self::Boolean(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
            Self::Error(e) => f.write_str(e),
        }
    }
}

/// One physical row of a sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// Zero-based row number within the sheet.
    pub index: usize,
    /// Cells in column order.
    pub cells: Vec<Cell>,
}

impl RawRow {
    /// Create a row from its index and cells.
    pub fn new(index: usize, cells: Vec<Cell>) -> Self {
        Self { index, cells }
    }

    /// Cell at zero-based column `col`. Missing cells come back as [`Cell::Blank`].
    pub fn cell(&self, col: usize) -> &Cell {
        self.cells.get(col).unwrap_or(&BLANK)
    }
}

/// A row that passed every validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidRecord {
    pub name: String,
    pub email: String,
    pub age: i64,
}

/// A row that failed validation or could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRecord {
    pub name: String,
    pub email: String,
    /// Absent when the age cell did not hold a non-negative integer.
    pub age: Option<i64>,
    /// Why the row was rejected. Never empty.
    pub error_message: String,
}
