//! Error types for containment matching

use crate::value::ValueKind;
use serde_json::Value;
use thiserror::Error;

/// Result type for matching operations
pub type MatchResult<T> = Result<T, MismatchError>;

/// Malformed control directive syntax
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    /// Parameter parentheses do not pair up
    #[error("unbalanced parentheses in directive '{0}'")]
    UnbalancedParens(String),

    /// `store` or `replace` used without a key
    #[error("directive '{0}' requires a key argument")]
    MissingArgument(String),

    /// `mask` given an argument
    #[error("directive '{0}' takes no argument")]
    UnexpectedArgument(String),
}

/// Reason an actual value is not contained in the expected template.
///
/// The first failure found during the recursive walk is reported; `path`
/// locates it within the actual document (`$`, `$.items[0].id`, ...).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MismatchError {
    #[error("kind does not match at {path}: {actual} <> {expected}")]
    KindMismatch {
        path: String,
        actual: ValueKind,
        expected: ValueKind,
    },

    /// The actual object carries more entries than the expected template
    #[error("too many entries in object at {path}: {actual} > {expected}")]
    TooManyActualEntries {
        path: String,
        actual: usize,
        expected: usize,
    },

    #[error("object at {path} does not contain key '{key}'")]
    MissingKey { path: String, key: String },

    #[error("array length does not match at {path}: {actual} <> {expected}")]
    LengthMismatch {
        path: String,
        actual: usize,
        expected: usize,
    },

    #[error("value does not match at {path}: {actual} <> {expected}")]
    ValueMismatch {
        path: String,
        actual: Value,
        expected: Value,
    },

    #[error("invalid control directive at {path}: {source}")]
    Directive {
        path: String,
        #[source]
        source: DirectiveError,
    },
}

impl MismatchError {
    /// JSON path of the position that failed
    pub fn path(&self) -> &str {
        match self {
            MismatchError::KindMismatch { path, .. }
            | MismatchError::TooManyActualEntries { path, .. }
            | MismatchError::MissingKey { path, .. }
            | MismatchError::LengthMismatch { path, .. }
            | MismatchError::ValueMismatch { path, .. }
            | MismatchError::Directive { path, .. } => path,
        }
    }
}
