//! # error — Application Error Types
//!
//! Failure paths of the backend client and the persisted-subset store. The
//! state container itself is total and has no error type; a failed subset
//! write is logged by the container and never propagated.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Network-level failure before any HTTP status arrived.
    #[error("backend unreachable: {0}")]
    Unreachable(String),

    /// The backend answered with a non-success status.
    #[error("backend rejected request: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("unexpected backend response: {0}")]
    Decode(String),

    /// The persisted-subset file could not be read or written.
    #[error("state file io: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted-subset document could not be encoded.
    #[error("state file encode: {0}")]
    Encode(#[from] serde_json::Error),
}
