//! Persistence sinks for classified records.
//!
//! The upload hands each collection to a [`Repository`] in one batch `save_all` call. Identity is
//! the repository's concern: the bundled implementations assign auto-increment ids starting at 1.
//!
//! - [`InMemoryRepository`]: keeps records in memory
//! - [`JsonLinesRepository`]: appends one JSON object per record to a file
//! - [`CsvRepository`]: writes records as CSV rows

pub mod csv;
pub mod json;
pub mod memory;

use serde::{Deserialize, Serialize};

use crate::error::UploadResult;

pub use self::csv::CsvRepository;
pub use self::json::JsonLinesRepository;
pub use self::memory::InMemoryRepository;

/// Batch-write destination for one record type.
pub trait Repository<T>: Send + Sync {
    /// Persist all `records`, in order.
    fn save_all(&self, records: Vec<T>) -> UploadResult<()>;
}

impl<T, R> Repository<T> for &R
where
    R: Repository<T> + ?Sized,
{
    fn save_all(&self, records: Vec<T>) -> UploadResult<()> {
        (**self).save_all(records)
    }
}

impl<T, R> Repository<T> for std::sync::Arc<R>
where
    R: Repository<T> + ?Sized,
{
    fn save_all(&self, records: Vec<T>) -> UploadResult<()> {
        (**self).save_all(records)
    }
}

/// A persisted record together with the id its repository assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stored<T> {
    pub id: u64,
    #[serde(flatten)]
    pub record: T,
}
