use thiserror::Error;

/// Errors for callers that want a `Result` instead of an `Option`.
///
/// Reads and marks themselves never fail.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum TimeSyncError {
    /// No clock has been created, or the last one was torn down.
    #[error("no live phase clock; create one before reading timestamps")]
    Uninitialized,
}
