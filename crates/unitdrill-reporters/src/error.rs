//! Reporter error types.

use thiserror::Error;

/// Errors that can occur when submitting a score.
#[derive(Debug, Error)]
pub enum ReporterError {
    /// The reporter has no endpoint to submit to.
    #[error("reporter not configured")]
    NotConfigured,

    /// The service answered with an error status.
    #[error("score rejected (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),
}
