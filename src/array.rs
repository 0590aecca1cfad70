//! Typed array: dtype + shape + owned byte store

use crate::error::{ArrayError, IndexError, Result};
use crate::store::BufferStore;
use crate::types::{DType, Index, Resolved, Scalar, Shape};

/// Shape-aware typed byte array
///
/// Owns exactly one contiguous buffer whose length is always
/// `shape.count() * dtype.element_size()`. Reshaping and type reassignment
/// are destructive: the new store is zero-filled.
///
/// The type does no internal locking; sharing one instance across threads
/// needs caller-side synchronization.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedArray {
    dtype: DType,
    shape: Shape,
    store: BufferStore,
}

impl Default for TypedArray {
    /// float64 array of shape `(1, 1)` holding `0.0`
    fn default() -> Self {
        let dtype = DType::default();
        let shape = Shape::default();
        let store = BufferStore::allocate(shape.count() * dtype.element_size());
        Self {
            dtype,
            shape,
            store,
        }
    }
}

impl TypedArray {
    /// Zero-valued array of the given type and shape
    pub fn new(dtype: DType, dims: impl Into<Vec<usize>>) -> Result<Self> {
        let dtype = dtype.validate()?;
        let shape = Shape::new(dims)?;
        let store = BufferStore::allocate(byte_len(&shape, dtype)?);
        Ok(Self {
            dtype,
            shape,
            store,
        })
    }

    /// Array adopting `bytes` as its store, checked against type and shape
    pub fn from_parts(dtype: DType, dims: impl Into<Vec<usize>>, bytes: Vec<u8>) -> Result<Self> {
        let dtype = dtype.validate()?;
        let shape = Shape::new(dims)?;
        let mut store = BufferStore::default();
        store.from_bytes(bytes, byte_len(&shape, dtype)?)?;
        Ok(Self {
            dtype,
            shape,
            store,
        })
    }

    pub(crate) fn from_validated(dtype: DType, shape: Shape, store: BufferStore) -> Self {
        debug_assert_eq!(store.len(), shape.count() * dtype.element_size());
        Self {
            dtype,
            shape,
            store,
        }
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn dims(&self) -> &[usize] {
        self.shape.dims()
    }

    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    pub fn element_size(&self) -> usize {
        self.dtype.element_size()
    }

    /// Element count, or total payload bytes when `string_size` is set on
    /// a byte-string array
    pub fn count(&self, string_size: bool) -> usize {
        let count = self.shape.count();
        if string_size && self.dtype.is_string() {
            count * self.dtype.element_size()
        } else {
            count
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shape.count() == 0
    }

    /// Reassign the element type from a type code or alias
    ///
    /// The code is canonicalized first; the store is then reallocated at the
    /// new element size and zero-filled.
    pub fn set_dtype(&mut self, code: &str) -> Result<()> {
        let dtype = DType::resolve(code)?;
        self.set_element_type(dtype)
    }

    /// Reassign the element type, zero-filling the store
    pub fn set_element_type(&mut self, dtype: DType) -> Result<()> {
        let dtype = dtype.validate()?;
        let len = byte_len(&self.shape, dtype)?;
        log::trace!("retype {} -> {}, {} bytes", self.dtype, dtype, len);
        self.store = BufferStore::allocate(len);
        self.dtype = dtype;
        Ok(())
    }

    /// Replace the shape, zero-filling the store
    ///
    /// No element survives a reshape, even where old and new geometry overlap.
    pub fn set_shape(&mut self, dims: impl Into<Vec<usize>>) -> Result<()> {
        let shape = Shape::new(dims)?;
        let len = byte_len(&shape, self.dtype)?;
        log::trace!("reshape {} -> {}, {} bytes", self.shape, shape, len);
        self.store = BufferStore::allocate(len);
        self.shape = shape;
        Ok(())
    }

    /// Same as [`TypedArray::set_shape`]
    pub fn set_size(&mut self, dims: impl Into<Vec<usize>>) -> Result<()> {
        self.set_shape(dims)
    }

    /// Resolve a key against the current shape
    pub fn resolve_index(&self, key: impl Into<Index>) -> Result<Resolved> {
        Ok(self.shape.resolve_index(&key.into())?)
    }

    /// Read one element
    ///
    /// Byte-string elements come back as raw bytes at full width.
    pub fn get(&self, key: impl Into<Index>) -> Result<Scalar> {
        let offset = self.offset(key.into())?;
        Ok(self.store.read_element(offset, self.dtype))
    }

    /// Write one element; on failure the array is unchanged
    pub fn set(&mut self, key: impl Into<Index>, value: impl Into<Scalar>) -> Result<()> {
        let offset = self.offset(key.into())?;
        self.store.write_element(offset, self.dtype, &value.into())
    }

    /// Install a raw little-endian buffer, keeping type and shape
    pub fn from_bytes(&mut self, buf: impl Into<Vec<u8>>) -> Result<()> {
        let expected = self.store.len();
        self.store.from_bytes(buf, expected)
    }

    /// Copy of the raw buffer: row-major, fixed-width, no header
    pub fn to_bytes(&self) -> Vec<u8> {
        self.store.to_bytes()
    }

    /// Borrowed view of the raw buffer
    pub fn as_bytes(&self) -> &[u8] {
        self.store.as_slice()
    }

    /// Decoded elements in flat row-major order
    pub fn iter(&self) -> impl Iterator<Item = Scalar> + '_ {
        self.store.elements(self.dtype)
    }

    fn offset(&self, key: Index) -> Result<usize> {
        match self.shape.resolve_index(&key)? {
            Resolved::Offset(offset) => Ok(offset),
            Resolved::Label(label) => Err(IndexError::Unresolved { label }.into()),
        }
    }
}

pub(crate) fn byte_len(shape: &Shape, dtype: DType) -> Result<usize> {
    shape
        .count()
        .checked_mul(dtype.element_size())
        .ok_or_else(|| ArrayError::InvalidShape {
            dims: shape.dims().to_vec(),
        })
}
