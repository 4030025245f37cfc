use thiserror::Error;

/// Convenience result type for upload operations.
pub type UploadResult<T> = Result<T, UploadError>;

/// Fatal error returned by an upload.
///
/// Any of these aborts the whole operation. Problems confined to a single row never surface here;
/// they are absorbed into a [`crate::types::RejectedRecord`].
#[derive(Debug, Error)]
pub enum UploadError {
    /// Underlying I/O error (e.g. upload file not found, sink file not writable).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The resource is not a well-formed spreadsheet.
    #[error("error reading Excel file: {0}")]
    Format(#[from] calamine::Error),

    /// The workbook opened but its first sheet could not be read.
    #[error("error reading Excel file: {message}")]
    Read { message: String },

    /// The upload contained no bytes.
    #[error("no file uploaded, please provide a valid Excel file")]
    EmptyUpload,

    /// CSV sink error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON sink error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A repository refused a batch write.
    #[error("failed to persist {collection} records: {message}")]
    Persist {
        collection: &'static str,
        message: String,
    },
}

/// Unexpected fault while reading a single row.
///
/// The `Display` output is the fault detail embedded in `Row {index} processing error: ...`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowFault {
    /// A cell was read as a kind it does not hold (e.g. text read from a numeric cell).
    #[error("cannot get a {expected} value from a {found} cell")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// The cell holds a spreadsheet error value such as `#DIV/0!`.
    #[error("cell holds error value {0}")]
    ErrorCell(String),
}

/// Reason a row failed validation.
///
/// The `Display` output is the exact message stored on the rejected record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("Name is required")]
    NameRequired,

    #[error("Invalid email format")]
    InvalidEmailFormat,

    #[error("Invalid age format: {raw}")]
    InvalidAgeFormat { raw: String },

    #[error("Age must be between 18 and 60")]
    AgeOutOfRange { age: i64 },
}
