//! Upload entrypoints.
//!
//! An upload runs as one unit of work:
//!
//! 1. the resource is opened with [`super::excel::Sheet`] (a fatal [`UploadError`] aborts here and
//!    nothing is persisted),
//! 2. every data row is classified with [`crate::pipeline::classify`],
//! 3. both collections are handed to their [`Repository`] in one batch each, accepted first.
//!
//! The two batch writes are not atomic relative to each other. If the accepted write fails the
//! rejected write is never issued; if the rejected write fails the accepted records stay saved.
//!
//! If an [`UploadObserver`] is configured, rejected rows, success, failure and alerts are
//! reported to it.

use std::error::Error as StdError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{UploadError, UploadResult};
use crate::pipeline::classify_rows_with;
use crate::sink::Repository;
use crate::types::{RejectedRecord, ValidRecord};

use super::excel::Sheet;
use super::observability::{UploadContext, UploadObserver, UploadSeverity, UploadStats};

/// Options controlling upload behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct UploadOptions {
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn UploadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: UploadSeverity,
}

impl fmt::Debug for UploadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            observer: None,
            alert_at_or_above: UploadSeverity::Critical,
        }
    }
}

/// Process an uploaded spreadsheet held in memory.
///
/// `source` labels the upload in observer callbacks (e.g. the original file name).
///
/// When an observer is configured, this function reports:
///
/// - `on_row_rejected` for every rejected row
/// - `on_success` on success, with accepted/rejected counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use bulk_upload::ingestion::{process_upload, UploadOptions};
/// use bulk_upload::sink::InMemoryRepository;
/// use bulk_upload::types::{RejectedRecord, ValidRecord};
///
/// # fn main() -> Result<(), bulk_upload::UploadError> {
/// let bytes = std::fs::read("people.xlsx")?;
/// let accepted: InMemoryRepository<ValidRecord> = InMemoryRepository::new("main_table");
/// let rejected: InMemoryRepository<RejectedRecord> = InMemoryRepository::new("failure_table");
///
/// let opts = UploadOptions::default();
/// let stats = process_upload("people.xlsx", &bytes, &accepted, &rejected, &opts)?;
/// println!("accepted={} rejected={}", stats.accepted, stats.rejected);
/// # Ok(())
/// # }
/// ```
pub fn process_upload<A, R>(
    source: &str,
    bytes: &[u8],
    accepted: &A,
    rejected: &R,
    options: &UploadOptions,
) -> UploadResult<UploadStats>
where
    A: Repository<ValidRecord> + ?Sized,
    R: Repository<RejectedRecord> + ?Sized,
{
    let ctx = UploadContext {
        source: source.to_string(),
        size_bytes: bytes.len(),
    };
    let result = run_upload(&ctx, bytes, accepted, rejected, options.observer.as_deref());
    report(&ctx, &result, options);
    result
}

/// Read the spreadsheet at `path` and process it like [`process_upload`].
///
/// The file is read into memory once and released before the records are persisted.
pub fn process_upload_from_path<A, R>(
    path: impl AsRef<Path>,
    accepted: &A,
    rejected: &R,
    options: &UploadOptions,
) -> UploadResult<UploadStats>
where
    A: Repository<ValidRecord> + ?Sized,
    R: Repository<RejectedRecord> + ?Sized,
{
    let path = path.as_ref();
    let source = path.display().to_string();
    match std::fs::read(path) {
        Ok(bytes) => process_upload(&source, &bytes, accepted, rejected, options),
        Err(e) => {
            let ctx = UploadContext {
                source,
                size_bytes: 0,
            };
            let result = Err(UploadError::from(e));
            report(&ctx, &result, options);
            result
        }
    }
}

fn run_upload<A, R>(
    ctx: &UploadContext,
    bytes: &[u8],
    accepted: &A,
    rejected: &R,
    observer: Option<&dyn UploadObserver>,
) -> UploadResult<UploadStats>
where
    A: Repository<ValidRecord> + ?Sized,
    R: Repository<RejectedRecord> + ?Sized,
{
    if bytes.is_empty() {
        return Err(UploadError::EmptyUpload);
    }

    let sheet = Sheet::from_bytes(bytes)?;
    let classified = classify_rows_with(sheet.rows(), |row, record| {
        if let Some(obs) = observer {
            obs.on_row_rejected(ctx, row, record);
        }
    });
    drop(sheet);

    let stats = UploadStats {
        accepted: classified.accepted.len(),
        rejected: classified.rejected.len(),
    };
    accepted.save_all(classified.accepted)?;
    rejected.save_all(classified.rejected)?;
    Ok(stats)
}

fn report(ctx: &UploadContext, result: &UploadResult<UploadStats>, options: &UploadOptions) {
    let Some(obs) = options.observer.as_ref() else {
        return;
    };
    match result {
        Ok(stats) => obs.on_success(ctx, *stats),
        Err(e) => {
            let sev = severity_for_error(e);
            obs.on_failure(ctx, sev, e);
            if sev >= options.alert_at_or_above {
                obs.on_alert(ctx, sev, e);
            }
        }
    }
}

fn severity_for_error(e: &UploadError) -> UploadSeverity {
    match e {
        UploadError::Io(_) => UploadSeverity::Critical,
        UploadError::Format(err) => {
            if error_chain_contains_io(err) {
                UploadSeverity::Critical
            } else {
                UploadSeverity::Error
            }
        }
        UploadError::Read { .. } => UploadSeverity::Error,
        UploadError::EmptyUpload => UploadSeverity::Warning,
        UploadError::Csv(_) | UploadError::Json(_) | UploadError::Persist { .. } => {
            UploadSeverity::Critical
        }
    }
}

fn error_chain_contains_io(e: &(dyn StdError + 'static)) -> bool {
    let mut cur: Option<&(dyn StdError + 'static)> = Some(e);
    while let Some(err) = cur {
        if err.is::<std::io::Error>() {
            return true;
        }
        cur = err.source();
    }
    false
}

/// Bundles the accepted and rejected repositories with upload options.
pub struct UploadService<A, R> {
    accepted: A,
    rejected: R,
    options: UploadOptions,
}

impl<A, R> UploadService<A, R>
where
    A: Repository<ValidRecord>,
    R: Repository<RejectedRecord>,
{
    /// Create a service writing to `accepted` and `rejected`, with default options.
    pub fn new(accepted: A, rejected: R) -> Self {
        Self {
            accepted,
            rejected,
            options: UploadOptions::default(),
        }
    }

    /// Replace the upload options.
    pub fn with_options(mut self, options: UploadOptions) -> Self {
        self.options = options;
        self
    }

    /// Repository for accepted records.
    pub fn accepted(&self) -> &A {
        &self.accepted
    }

    /// Repository for rejected records.
    pub fn rejected(&self) -> &R {
        &self.rejected
    }

    /// Process an in-memory upload. See [`process_upload`].
    pub fn process_bytes(&self, source: &str, bytes: &[u8]) -> UploadResult<UploadStats> {
        process_upload(source, bytes, &self.accepted, &self.rejected, &self.options)
    }

    /// Process the spreadsheet at `path`. See [`process_upload_from_path`].
    pub fn process_path(&self, path: impl AsRef<Path>) -> UploadResult<UploadStats> {
        process_upload_from_path(path, &self.accepted, &self.rejected, &self.options)
    }
}

impl<A, R> fmt::Debug for UploadService<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadService")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Convenience helper for callers that want an owned request object.
///
/// This can be useful if you want to enqueue upload work in a job system.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Path to the uploaded spreadsheet.
    pub path: PathBuf,
    /// Options controlling the upload.
    pub options: UploadOptions,
}

impl UploadRequest {
    /// Execute the request by calling [`process_upload_from_path`].
    pub fn run<A, R>(&self, accepted: &A, rejected: &R) -> UploadResult<UploadStats>
    where
        A: Repository<ValidRecord> + ?Sized,
        R: Repository<RejectedRecord> + ?Sized,
    {
        process_upload_from_path(&self.path, accepted, rejected, &self.options)
    }
}
