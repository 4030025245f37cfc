//! Upload entrypoints and the spreadsheet reader.
//!
//! Most callers should use [`process_upload`] or [`UploadService`] (from [`service`]) which:
//!
//! - open the first sheet of the upload with [`excel::Sheet`]
//! - classify every data row into accepted / rejected records
//! - persist both collections to their repositories
//! - optionally report rejections/success/failure/alerts to an [`UploadObserver`]

pub mod excel;
pub mod observability;
pub mod service;

pub use excel::{Sheet, SheetRows};
pub use observability::{
    CompositeObserver, FileObserver, StdErrObserver, UploadContext, UploadObserver, UploadSeverity,
    UploadStats,
};
pub use service::{
    UploadOptions, UploadRequest, UploadService, process_upload, process_upload_from_path,
};
