//! Backing byte storage for a typed array

use crate::codec::{encode_element, read_element};
use crate::error::{ArrayError, Result};
use crate::types::{DType, Scalar};

/// Contiguous, exclusively owned element bytes
///
/// The store knows nothing about shape; offsets handed to it have already
/// been validated against the owning array's geometry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferStore {
    data: Vec<u8>,
}

impl BufferStore {
    /// Zero-filled buffer of exactly `byte_len` bytes
    pub fn allocate(byte_len: usize) -> Self {
        Self {
            data: vec![0u8; byte_len],
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Decode the element at `offset` (in elements, not bytes)
    pub fn read_element(&self, offset: usize, dtype: DType) -> Scalar {
        read_element(dtype, self.element_bytes(offset, dtype))
    }

    /// Encode `value` into the element at `offset`
    ///
    /// On failure the element keeps its previous bytes.
    pub fn write_element(&mut self, offset: usize, dtype: DType, value: &Scalar) -> Result<()> {
        let encoded = encode_element(dtype, value)?;
        let size = dtype.element_size();
        let start = offset * size;
        self.data[start..start + size].copy_from_slice(&encoded);
        Ok(())
    }

    /// Replace the whole buffer, which must hold exactly `expected` bytes
    pub fn from_bytes(&mut self, buf: impl Into<Vec<u8>>, expected: usize) -> Result<()> {
        let buf = buf.into();
        if buf.len() != expected {
            return Err(ArrayError::SizeMismatch {
                expected,
                actual: buf.len(),
            });
        }
        log::trace!("installing {} byte buffer", buf.len());
        self.data = buf;
        Ok(())
    }

    /// Exact copy of the stored bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        self.data.clone()
    }

    /// Iterate decoded elements in flat order
    pub fn elements(&self, dtype: DType) -> impl Iterator<Item = Scalar> + '_ {
        // zero-width elements cannot occur: every dtype is at least one byte wide
        self.data
            .chunks_exact(dtype.element_size())
            .map(move |chunk| read_element(dtype, chunk))
    }

    fn element_bytes(&self, offset: usize, dtype: DType) -> &[u8] {
        let size = dtype.element_size();
        let start = offset * size;
        &self.data[start..start + size]
    }
}
