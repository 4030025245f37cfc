//! `bulk-upload` ingests a spreadsheet of person records (name, email, age), validates each row,
//! and splits the rows into two persisted collections: accepted [`types::ValidRecord`]s and
//! [`types::RejectedRecord`]s annotated with the reason they failed.
//!
//! The primary entrypoints are [`ingestion::process_upload`] (bytes already in memory, e.g. an
//! HTTP multipart body) and [`ingestion::process_upload_from_path`].
//!
//! ## Input layout
//!
//! - **File formats**: `.xlsx`, `.xlsm`, `.xls`, `.xlsb`, `.ods` (detected from content).
//! - Only the first sheet is read.
//! - Row 1 (index 0) is a header and is always skipped.
//! - Columns A, B, C hold name, email and age, in that order.
//!
//! ## Validation
//!
//! Rules run in a fixed order and the first failure is recorded:
//!
//! - name empty or whitespace: `Name is required`
//! - email without `@`: `Invalid email format`
//! - age cell not numeric: `Invalid age format: {raw}`
//! - age outside 18..=60: `Age must be between 18 and 60`
//!
//! A row that cannot be read at all (e.g. a number in the name column) is rejected with
//! `Row {index} processing error: {detail}`. Row-level problems never abort an upload; only a
//! resource that is not a readable spreadsheet does, and then nothing is persisted.
//!
//! ## Quick example
//!
//! ```no_run
//! use bulk_upload::ingestion::UploadService;
//! use bulk_upload::sink::InMemoryRepository;
//! use bulk_upload::types::{RejectedRecord, ValidRecord};
//!
//! # fn main() -> Result<(), bulk_upload::UploadError> {
//! let service = UploadService::new(
//!     InMemoryRepository::<ValidRecord>::new("main_table"),
//!     InMemoryRepository::<RejectedRecord>::new("failure_table"),
//! );
//! let stats = service.process_path("people.xlsx")?;
//! println!("accepted={} rejected={}", stats.accepted, stats.rejected);
//! for record in service.rejected().records() {
//!     println!("{} <{}>: {}", record.name, record.email, record.error_message);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: upload entrypoints, spreadsheet reader and observer hooks
//! - [`pipeline`]: per-row classification and validation rules
//! - [`sink`]: repositories the classified records are persisted to
//! - [`types`]: cells, rows and record types
//! - [`error`]: error types

pub mod error;
pub mod ingestion;
pub mod pipeline;
pub mod sink;
pub mod types;

pub use error::{UploadError, UploadResult};
