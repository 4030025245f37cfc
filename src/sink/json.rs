use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;

use crate::error::{UploadError, UploadResult};

use super::{Repository, Stored};

/// Appends records to a newline-delimited JSON file, one `{"id": .., ..fields}` object per line.
#[derive(Debug)]
pub struct JsonLinesRepository<T> {
    path: PathBuf,
    state: Mutex<JsonLinesState>,
    _record: PhantomData<fn(T)>,
}

#[derive(Debug)]
struct JsonLinesState {
    out: BufWriter<File>,
    next_id: u64,
}

impl<T> JsonLinesRepository<T> {
    /// Create (or truncate) the file at `path`.
    pub fn create(path: impl AsRef<Path>) -> UploadResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;
        Ok(Self {
            path,
            state: Mutex::new(JsonLinesState {
                out: BufWriter::new(file),
                next_id: 1,
            }),
            _record: PhantomData,
        })
    }

    /// Output file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T: Serialize> Repository<T> for JsonLinesRepository<T> {
    fn save_all(&self, records: Vec<T>) -> UploadResult<()> {
        let mut state = self.state.lock().map_err(|_| UploadError::Persist {
            collection: "json lines",
            message: format!("writer lock poisoned ({})", self.path.display()),
        })?;
        let JsonLinesState { out, next_id } = &mut *state;

        for record in records {
            let stored = Stored { id: *next_id, record };
            serde_json::to_writer(&mut *out, &stored)?;
            out.write_all(b"\n")?;
            *next_id += 1;
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;
    use crate::types::RejectedRecord;

    fn tmp_file(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("bulk-upload-{name}-{nanos}.ndjson"))
    }

    #[test]
    fn writes_one_object_per_line_with_ids() {
        let path = tmp_file("rejected");
        let repo = JsonLinesRepository::create(&path).unwrap();
        repo.save_all(vec![
            RejectedRecord {
                name: "Carl".to_string(),
                email: "no-at-sign".to_string(),
                age: Some(40),
                error_message: "Invalid email format".to_string(),
            },
            RejectedRecord {
                name: "Dana".to_string(),
                email: "dana@example.com".to_string(),
                age: None,
                error_message: "Invalid age format: abc".to_string(),
            },
        ])
        .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["id"], 1);
        assert_eq!(lines[0]["name"], "Carl");
        assert_eq!(lines[1]["id"], 2);
        assert!(lines[1]["age"].is_null());

        let second = text.lines().nth(1).unwrap();
        let stored: Stored<RejectedRecord> = serde_json::from_str(second).unwrap();
        assert_eq!(stored.record.error_message, "Invalid age format: abc");

        let _ = std::fs::remove_file(&path);
    }
}
