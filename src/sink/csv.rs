use std::fs::File;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;

use crate::error::{UploadError, UploadResult};

use super::Repository;

/// Writes records to a CSV file. The header row comes from the record's field names and is
/// written once, before the first record.
#[derive(Debug)]
pub struct CsvRepository<T> {
    path: PathBuf,
    writer: Mutex<csv::Writer<File>>,
    _record: PhantomData<fn(T)>,
}

impl<T> CsvRepository<T> {
    /// Create (or truncate) the file at `path`.
    pub fn create(path: impl AsRef<Path>) -> UploadResult<Self> {
        let path = path.as_ref().to_path_buf();
        let writer = csv::WriterBuilder::new().has_headers(true).from_path(&path)?;
        Ok(Self {
            path,
            writer: Mutex::new(writer),
            _record: PhantomData,
        })
    }

    /// Output file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T: Serialize> Repository<T> for CsvRepository<T> {
    fn save_all(&self, records: Vec<T>) -> UploadResult<()> {
        let mut writer = self.writer.lock().map_err(|_| UploadError::Persist {
            collection: "csv",
            message: format!("writer lock poisoned ({})", self.path.display()),
        })?;
        for record in &records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;
    use crate::types::{RejectedRecord, ValidRecord};

    fn tmp_file(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("bulk-upload-{name}-{nanos}.csv"))
    }

    #[test]
    fn header_is_written_once_across_batches() {
        let path = tmp_file("valid");
        let repo = CsvRepository::create(&path).unwrap();
        repo.save_all(vec![ValidRecord {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            age: 30,
        }])
        .unwrap();
        repo.save_all(vec![ValidRecord {
            name: "Kim".to_string(),
            email: "kim@example.com".to_string(),
            age: 60,
        }])
        .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "name,email,age\nAlice,alice@example.com,30\nKim,kim@example.com,60\n"
        );
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn absent_age_is_an_empty_field() {
        let path = tmp_file("rejected");
        let repo = CsvRepository::create(&path).unwrap();
        repo.save_all(vec![RejectedRecord {
            name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            age: None,
            error_message: "Invalid age format: abc".to_string(),
        }])
        .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "name,email,age,error_message\nDana,dana@example.com,,Invalid age format: abc\n"
        );
        let _ = std::fs::remove_file(&path);
    }
}
