//! Row classification.
//!
//! Each data row is read into `(name, email, age)`, validated with [`validate::validate_record`],
//! and routed to exactly one of two collections. Row 0 is the header and is always skipped.
//!
//! ```rust
//! use bulk_upload::pipeline::classify_rows;
//! use bulk_upload::types::{Cell, RawRow};
//!
//! let text = |s: &str| Cell::Text(s.to_string());
//! let rows = vec![
//!     RawRow::new(0, vec![text("name"), text("email"), text("age")]),
//!     RawRow::new(1, vec![text("Alice"), text("alice@example.com"), Cell::Numeric(30.0)]),
//!     RawRow::new(2, vec![text("Carl"), text("no-at-sign"), Cell::Numeric(40.0)]),
//! ];
//!
//! let out = classify_rows(rows);
//! assert_eq!(out.accepted.len(), 1);
//! assert_eq!(out.rejected[0].error_message, "Invalid email format");
//! ```

pub mod validate;

use crate::error::RowFault;
use crate::types::{CellKind, RawRow, RejectedRecord, ValidRecord};

pub use validate::{MAX_AGE, MIN_AGE, validate_record};

/// Zero-based index of the header row.
pub const HEADER_ROW: usize = 0;

/// Output of a full classification pass, in row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classified {
    pub accepted: Vec<ValidRecord>,
    pub rejected: Vec<RejectedRecord>,
}

impl Classified {
    /// Total number of classified data rows.
    pub fn total(&self) -> usize {
        self.accepted.len() + self.rejected.len()
    }
}

/// Classify every data row, skipping the header.
pub fn classify_rows<I>(rows: I) -> Classified
where
    I: IntoIterator<Item = RawRow>,
{
    classify_rows_with(rows, |_, _| {})
}

/// Like [`classify_rows`], calling `on_reject` with each rejected record and its row index.
pub fn classify_rows_with<I, F>(rows: I, mut on_reject: F) -> Classified
where
    I: IntoIterator<Item = RawRow>,
    F: FnMut(usize, &RejectedRecord),
{
    let mut out = Classified::default();
    for row in rows {
        if row.index == HEADER_ROW {
            continue;
        }
        match classify(&row) {
            Ok(valid) => out.accepted.push(valid),
            Err(rejected) => {
                on_reject(row.index, &rejected);
                out.rejected.push(rejected);
            }
        }
    }
    out
}

/// Classify a single data row.
///
/// Never fails: validation failures and faults reading the row both come back as the
/// [`RejectedRecord`] variant.
pub fn classify(row: &RawRow) -> Result<ValidRecord, RejectedRecord> {
    let mut fields = RowFields::default();
    match fields.read(row) {
        Ok(age) => route(fields, age),
        Err(fault) => Err(RejectedRecord {
            name: fields.name,
            email: fields.email,
            age: None,
            error_message: format!("Row {} processing error: {fault}", row.index),
        }),
    }
}

/// Fields read so far from a row. Partially filled when a read faults.
#[derive(Debug, Default)]
struct RowFields {
    name: String,
    email: String,
}

/// How the age cell was read.
#[derive(Debug)]
struct AgeCell {
    age: Option<i64>,
    raw: String,
}

impl RowFields {
    fn read(&mut self, row: &RawRow) -> Result<AgeCell, RowFault> {
        self.name = row.cell(0).string_value()?.trim().to_string();
        self.email = row.cell(1).string_value()?.trim().to_string();

        let cell = row.cell(2);
        let age = if cell.kind() == CellKind::Numeric {
            // `as` truncates toward zero and saturates at the i64 bounds.
            let age = cell.numeric_value()? as i64;
            AgeCell {
                age: Some(age),
                raw: age.to_string(),
            }
        } else {
            AgeCell {
                age: None,
                raw: cell.to_string(),
            }
        };
        Ok(age)
    }
}

fn route(fields: RowFields, age: AgeCell) -> Result<ValidRecord, RejectedRecord> {
    match validate_record(&fields.name, &fields.email, age.age, &age.raw) {
        Ok(age) => Ok(ValidRecord {
            name: fields.name,
            email: fields.email,
            age,
        }),
        Err(failure) => Err(RejectedRecord {
            name: fields.name,
            email: fields.email,
            age: parse_unsigned(&age.raw),
            error_message: failure.to_string(),
        }),
    }
}

/// `raw` as an integer when it is a plain run of ASCII digits.
fn parse_unsigned(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
