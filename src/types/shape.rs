//! Array geometry: dimensions, element count and row-major offsets

use super::index::{Index, Resolved};
use crate::error::{ArrayError, IndexError, Result};
use std::fmt;

/// Ordered dimension sizes of a typed array
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: Vec<usize>,
    strides: Vec<usize>,
}

impl Shape {
    /// Create a shape, rejecting empty dimension lists and element counts
    /// or strides that overflow `usize`
    ///
    /// A zero dimension does not hide an overflow in the axes after it:
    /// `(0, usize::MAX, 2)` is rejected.
    pub fn new(dims: impl Into<Vec<usize>>) -> Result<Self> {
        let dims = dims.into();
        let counted = dims
            .iter()
            .try_fold(1usize, |acc, &dim| acc.checked_mul(dim));
        match (dims.is_empty(), counted, checked_strides(&dims)) {
            (false, Some(_), Some(strides)) => Ok(Self { dims, strides }),
            _ => Err(ArrayError::InvalidShape { dims }),
        }
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Total number of elements
    pub fn count(&self) -> usize {
        self.dims.iter().product()
    }

    /// Row-major strides in elements; the last axis has stride 1
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Resolve a key to a flat element offset
    ///
    /// Labels are handed back untouched; they are never bounds checked.
    pub fn resolve_index(&self, key: &Index) -> Result<Resolved, IndexError> {
        match key {
            Index::Flat(index) => {
                let len = self.count();
                if *index >= len {
                    return Err(IndexError::OutOfRange { index: *index, len });
                }
                Ok(Resolved::Offset(*index))
            }
            Index::Tuple(indices) => {
                if indices.len() != self.rank() {
                    return Err(IndexError::WrongRank {
                        expected: self.rank(),
                        actual: indices.len(),
                    });
                }
                let mut offset = 0;
                for (axis, ((&index, &len), stride)) in indices
                    .iter()
                    .zip(&self.dims)
                    .zip(&self.strides)
                    .enumerate()
                {
                    if index >= len {
                        return Err(IndexError::AxisOutOfRange { axis, index, len });
                    }
                    offset += index * *stride;
                }
                Ok(Resolved::Offset(offset))
            }
            Index::Label(label) => Ok(Resolved::Label(label.clone())),
        }
    }
}

fn checked_strides(dims: &[usize]) -> Option<Vec<usize>> {
    let mut strides = vec![1usize; dims.len()];
    for axis in (0..dims.len().saturating_sub(1)).rev() {
        strides[axis] = strides[axis + 1].checked_mul(dims[axis + 1])?;
    }
    Some(strides)
}

impl Default for Shape {
    fn default() -> Self {
        Self {
            dims: vec![1, 1],
            strides: vec![1, 1],
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, dim) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", dim)?;
        }
        if self.dims.len() == 1 {
            write!(f, ",")?;
        }
        write!(f, ")")
    }
}
