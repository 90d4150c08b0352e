//! Per-segment fetch error, so workers can report task outcomes for
//! aggregation.

use thiserror::Error;

/// Error from a single segment fetch (transport, HTTP status, or disk).
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported a transport error (DNS, connect, protocol, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Response completed with a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Creating or writing the destination file failed.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
