//! Error types for typedarray

use crate::types::DType;
use thiserror::Error;

pub type Result<T, E = ArrayError> = std::result::Result<T, E>;

/// Failure of a typed array operation
///
/// Every variant is returned synchronously to the caller. The codec never
/// retries and never leaves an element half-written.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArrayError {
    /// Type code not present in the dtype vocabulary
    #[error("unknown type code: {code:?}")]
    UnknownType { code: String },
    /// Byte length inconsistent with shape x element size
    #[error("data size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    /// Key could not be resolved to an element
    #[error(transparent)]
    Index(#[from] IndexError),
    /// Value cannot be stored in the active element type
    #[error("cannot store {value} in a {dtype} element")]
    TypeMismatch { dtype: DType, value: String },
    /// Nested input is not rectangular
    #[error("ragged input: row {row} has {actual} items, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },
    /// Shape with no dimensions
    #[error("invalid shape: {dims:?}")]
    InvalidShape { dims: Vec<usize> },
    /// JSON input that is not an array payload
    #[error("invalid JSON payload: {0}")]
    Json(String),
    /// Self-check round trip produced a different array
    #[error("self check failed at the {stage} round trip")]
    CheckFailed { stage: &'static str },
}

/// Index resolution failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// Flat index outside `[0, count)`
    #[error("index {index} out of range for {len} elements")]
    OutOfRange { index: usize, len: usize },
    /// Tuple key length differs from the array rank
    #[error("expected {expected} indices, got {actual}")]
    WrongRank { expected: usize, actual: usize },
    /// One tuple component outside its dimension
    #[error("index {index} out of range for axis {axis} with size {len}")]
    AxisOutOfRange {
        axis: usize,
        index: usize,
        len: usize,
    },
    /// Label key reached element access without being translated
    #[error("label {label:?} has no position in the array")]
    Unresolved { label: String },
}

impl ArrayError {
    pub(crate) fn mismatch(dtype: DType, value: impl std::fmt::Debug) -> Self {
        ArrayError::TypeMismatch {
            dtype,
            value: format!("{:?}", value),
        }
    }
}
