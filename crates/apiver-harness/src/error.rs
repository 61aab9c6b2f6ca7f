//! Error types for running control files

use apiver_match::MismatchError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for control file operations
pub type ControlResult<T> = Result<T, ControlError>;

/// Failure reported by a [`RequestClient`](crate::RequestClient)
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid HTTP method '{0}'")]
    InvalidMethod(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors that stop a control file.
///
/// `step` is the zero-based index of the failing step in its control file and
/// `target` the request path that was sent for it.
#[derive(Debug, Error)]
pub enum ControlError {
    /// Failed to read a control file or fixture directory
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Control file is not valid JSON or does not have the step layout
    #[error("failed to parse control file {path}: {source}")]
    DecodeControlFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("step {step} ({target}): {source}")]
    Transport {
        step: usize,
        target: String,
        #[source]
        source: TransportError,
    },

    /// Response body expected to be JSON did not decode
    #[error("step {step} ({target}): response is not valid JSON: {source}")]
    DecodeResponse {
        step: usize,
        target: String,
        #[source]
        source: serde_json::Error,
    },

    /// Plain text expectation not found in the response body
    #[error("step {step} ({target}): response {actual:?} does not contain {expected:?}")]
    BodyMismatch {
        step: usize,
        target: String,
        expected: String,
        actual: String,
    },

    #[error("step {step} ({target}): {source}")]
    Mismatch {
        step: usize,
        target: String,
        #[source]
        source: MismatchError,
    },
}

impl ControlError {
    /// Index of the step that failed, for errors raised while running steps
    pub fn step(&self) -> Option<usize> {
        match self {
            ControlError::Transport { step, .. }
            | ControlError::DecodeResponse { step, .. }
            | ControlError::BodyMismatch { step, .. }
            | ControlError::Mismatch { step, .. } => Some(*step),
            ControlError::Io { .. } | ControlError::DecodeControlFile { .. } => None,
        }
    }
}
