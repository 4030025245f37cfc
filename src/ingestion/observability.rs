//! Upload observability: hooks for logging and alerting.
//!
//! An [`UploadObserver`] is told about every rejected row, the outcome of each upload, and alerts
//! for failures at or above the configured [`UploadSeverity`] threshold. Observers must not fail
//! the upload, so every hook returns `()`.
//!
//! Provided observers:
//!
//! - [`StdErrObserver`] prints one line per event to stderr
//! - [`FileObserver`] appends one line per event to a log file
//! - [`CompositeObserver`] forwards each event to several observers in order

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::UploadError;
use crate::types::RejectedRecord;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UploadSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (e.g. nothing was uploaded).
    Warning,
    /// Error-level event (the upload could not be read).
    Error,
    /// Critical error (I/O or persistence failures).
    Critical,
}

/// Context about an upload attempt.
#[derive(Debug, Clone)]
pub struct UploadContext {
    /// Where the upload came from: a file path, or a caller-supplied label for in-memory bytes.
    pub source: String,
    /// Size of the uploaded resource in bytes (0 when it could not be read).
    pub size_bytes: usize,
}

/// Stats reported on a successful upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadStats {
    /// Records written to the accepted collection.
    pub accepted: usize,
    /// Records written to the rejected collection.
    pub rejected: usize,
}

/// Observer interface for upload outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait UploadObserver: Send + Sync {
    /// Called once per rejected row, before anything is persisted.
    fn on_row_rejected(&self, _ctx: &UploadContext, _row: usize, _record: &RejectedRecord) {}

    /// Called when the upload succeeds.
    fn on_success(&self, _ctx: &UploadContext, _stats: UploadStats) {}

    /// Called when the upload fails.
    fn on_failure(&self, _ctx: &UploadContext, _severity: UploadSeverity, _error: &UploadError) {}

    /// Called when an upload failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &UploadContext, severity: UploadSeverity, error: &UploadError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn UploadObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn UploadObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl UploadObserver for CompositeObserver {
    fn on_row_rejected(&self, ctx: &UploadContext, row: usize, record: &RejectedRecord) {
        for o in &self.observers {
            o.on_row_rejected(ctx, row, record);
        }
    }

    fn on_success(&self, ctx: &UploadContext, stats: UploadStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &UploadContext, severity: UploadSeverity, error: &UploadError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &UploadContext, severity: UploadSeverity, error: &UploadError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs upload events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl UploadObserver for StdErrObserver {
    fn on_row_rejected(&self, ctx: &UploadContext, row: usize, record: &RejectedRecord) {
        eprintln!(
            "[upload][rejected] source={} row={} err={}",
            ctx.source, row, record.error_message
        );
    }

    fn on_success(&self, ctx: &UploadContext, stats: UploadStats) {
        eprintln!(
            "[upload][ok] source={} bytes={} accepted={} rejected={}",
            ctx.source, ctx.size_bytes, stats.accepted, stats.rejected
        );
    }

    fn on_failure(&self, ctx: &UploadContext, severity: UploadSeverity, error: &UploadError) {
        eprintln!("[upload][{:?}] source={} err={}", severity, ctx.source, error);
    }

    fn on_alert(&self, ctx: &UploadContext, severity: UploadSeverity, error: &UploadError) {
        eprintln!(
            "[ALERT][upload][{:?}] source={} err={}",
            severity, ctx.source, error
        );
    }
}

/// Appends upload events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl UploadObserver for FileObserver {
    fn on_row_rejected(&self, ctx: &UploadContext, row: usize, record: &RejectedRecord) {
        self.append_line(&format!(
            "{} rejected source={} row={} err={}",
            unix_ts(),
            ctx.source,
            row,
            record.error_message
        ));
    }

    fn on_success(&self, ctx: &UploadContext, stats: UploadStats) {
        self.append_line(&format!(
            "{} ok source={} bytes={} accepted={} rejected={}",
            unix_ts(),
            ctx.source,
            ctx.size_bytes,
            stats.accepted,
            stats.rejected
        ));
    }

    fn on_failure(&self, ctx: &UploadContext, severity: UploadSeverity, error: &UploadError) {
        self.append_line(&format!(
            "{} fail severity={:?} source={} err={}",
            unix_ts(),
            severity,
            ctx.source,
            error
        ));
    }

    fn on_alert(&self, ctx: &UploadContext, severity: UploadSeverity, error: &UploadError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} source={} err={}",
            unix_ts(),
            severity,
            ctx.source,
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
