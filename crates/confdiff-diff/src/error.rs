//! Error types for the diff crate.

/// Errors that can occur while assembling a diff report.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum DiffError {
    /// A mutator (or a second `finalize`) was called on a finalized builder.
    #[error("report already finalized")]
    ReportAlreadyFinalized,
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
