//! ndarray integration for typed arrays
//!
//! [`NdArray`] is the external numeric-array structure: one ndarray per
//! element type, tagged with its numpy array-protocol dtype string.
//!
//! Exports are copies. [`TypedArray::to_numpy`] hands out an owned array
//! whose edits never reach the typed array. [`TypedArray::with_numpy_mut`]
//! is the writeable path: the closure edits a view and every change is
//! written back into the store when it returns.
//!
//! Enable with the `ndarray` feature flag.

use crate::array::TypedArray;
use crate::error::{ArrayError, Result};
use crate::types::DType;
use ndarray::{ArrayD, ArrayViewMutD, IxDyn};

/// Trait for primitives that can back a typed array element
pub trait ArrayType: Sized + Clone + 'static {
    const DTYPE: DType;

    fn read_le(bytes: &[u8]) -> Self;
    fn write_le(&self, out: &mut Vec<u8>);
    fn unwrap_ref(arr: &NdArray) -> Option<&ArrayD<Self>>;
}

/// Dynamically typed external array
#[derive(Debug, Clone, PartialEq)]
pub enum NdArray {
    I8(ArrayD<i8>),
    I16(ArrayD<i16>),
    I32(ArrayD<i32>),
    I64(ArrayD<i64>),
    U8(ArrayD<u8>),
    U16(ArrayD<u16>),
    U32(ArrayD<u32>),
    U64(ArrayD<u64>),
    F32(ArrayD<f32>),
    F64(ArrayD<f64>),
    /// Fixed-width byte strings (`|S<width>`); shorter items are zero
    /// padded on import, longer ones truncated
    Bytes { width: usize, data: ArrayD<Vec<u8>> },
}

macro_rules! array_type {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ArrayType for $ty {
                const DTYPE: DType = DType::$variant;

                fn read_le(bytes: &[u8]) -> Self {
                    let mut arr = [0u8; std::mem::size_of::<$ty>()];
                    arr.copy_from_slice(bytes);
                    <$ty>::from_le_bytes(arr)
                }

                fn write_le(&self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_le_bytes());
                }

                fn unwrap_ref(arr: &NdArray) -> Option<&ArrayD<Self>> {
                    match arr {
                        NdArray::$variant(a) => Some(a),
                        _ => None,
                    }
                }
            }

            impl From<ArrayD<$ty>> for NdArray {
                fn from(arr: ArrayD<$ty>) -> Self {
                    NdArray::$variant(arr)
                }
            }
        )*
    };
}

array_type! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
}

impl NdArray {
    /// Element type of the wrapped array
    pub fn dtype(&self) -> DType {
        match self {
            NdArray::I8(_) => DType::I8,
            NdArray::I16(_) => DType::I16,
            NdArray::I32(_) => DType::I32,
            NdArray::I64(_) => DType::I64,
            NdArray::U8(_) => DType::U8,
            NdArray::U16(_) => DType::U16,
            NdArray::U32(_) => DType::U32,
            NdArray::U64(_) => DType::U64,
            NdArray::F32(_) => DType::F32,
            NdArray::F64(_) => DType::F64,
            NdArray::Bytes { width, .. } => DType::Bytes(*width),
        }
    }

    /// numpy array-protocol dtype string, e.g. `<f8` or `|S3`
    pub fn dtype_str(&self) -> String {
        self.dtype().to_external()
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            NdArray::I8(a) => a.shape(),
            NdArray::I16(a) => a.shape(),
            NdArray::I32(a) => a.shape(),
            NdArray::I64(a) => a.shape(),
            NdArray::U8(a) => a.shape(),
            NdArray::U16(a) => a.shape(),
            NdArray::U32(a) => a.shape(),
            NdArray::U64(a) => a.shape(),
            NdArray::F32(a) => a.shape(),
            NdArray::F64(a) => a.shape(),
            NdArray::Bytes { data, .. } => data.shape(),
        }
    }

    /// Borrow the wrapped array if it holds `T`
    pub fn as_array<T: ArrayType>(&self) -> Option<&ArrayD<T>> {
        T::unwrap_ref(self)
    }

    /// Elements in logical row-major order as little-endian bytes
    fn to_le_bytes(&self) -> Vec<u8> {
        match self {
            NdArray::I8(a) => le_bytes(a),
            NdArray::I16(a) => le_bytes(a),
            NdArray::I32(a) => le_bytes(a),
            NdArray::I64(a) => le_bytes(a),
            NdArray::U8(a) => le_bytes(a),
            NdArray::U16(a) => le_bytes(a),
            NdArray::U32(a) => le_bytes(a),
            NdArray::U64(a) => le_bytes(a),
            NdArray::F32(a) => le_bytes(a),
            NdArray::F64(a) => le_bytes(a),
            NdArray::Bytes { width, data } => {
                let mut out = Vec::with_capacity(data.len() * width);
                for item in data.iter() {
                    let n = item.len().min(*width);
                    out.extend_from_slice(&item[..n]);
                    out.resize(out.len() + width - n, 0);
                }
                out
            }
        }
    }
}

fn le_bytes<T: ArrayType>(arr: &ArrayD<T>) -> Vec<u8> {
    let mut out = Vec::with_capacity(arr.len() * T::DTYPE.element_size());
    // iter() walks logical order, so non-standard layouts copy correctly
    for value in arr.iter() {
        value.write_le(&mut out);
    }
    out
}

impl TypedArray {
    /// Adopt shape, dtype and data of an external array
    ///
    /// The dtype goes through the external vocabulary; a zero-dimensional
    /// array becomes shape `(1, 1)`. On failure the array is unchanged.
    pub fn from_numpy(&mut self, external: &NdArray) -> Result<()> {
        let dtype = DType::from_external(&external.dtype_str())?;
        let dims = match external.shape() {
            [] => vec![1, 1],
            dims => dims.to_vec(),
        };
        *self = TypedArray::from_parts(dtype, dims, external.to_le_bytes())?;
        Ok(())
    }

    /// Owned external copy; edits to it never reach this array
    pub fn to_numpy(&self) -> Result<NdArray> {
        Ok(match self.dtype() {
            DType::I8 => self.to_ndarray::<i8>()?.into(),
            DType::I16 => self.to_ndarray::<i16>()?.into(),
            DType::I32 => self.to_ndarray::<i32>()?.into(),
            DType::I64 => self.to_ndarray::<i64>()?.into(),
            DType::U8 => self.to_ndarray::<u8>()?.into(),
            DType::U16 => self.to_ndarray::<u16>()?.into(),
            DType::U32 => self.to_ndarray::<u32>()?.into(),
            DType::U64 => self.to_ndarray::<u64>()?.into(),
            DType::F32 => self.to_ndarray::<f32>()?.into(),
            DType::F64 => self.to_ndarray::<f64>()?.into(),
            DType::Bytes(width) => {
                let items: Vec<Vec<u8>> = self
                    .as_bytes()
                    .chunks_exact(width)
                    .map(<[u8]>::to_vec)
                    .collect();
                NdArray::Bytes {
                    width,
                    data: shaped(self.dims(), items, width)?,
                }
            }
        })
    }

    /// Convert to an ndarray ArrayD of a matching primitive type
    pub fn to_ndarray<T: ArrayType>(&self) -> Result<ArrayD<T>> {
        if T::DTYPE != self.dtype() {
            return Err(ArrayError::mismatch(self.dtype(), std::any::type_name::<T>()));
        }
        let elements: Vec<T> = self
            .as_bytes()
            .chunks_exact(T::DTYPE.element_size())
            .map(T::read_le)
            .collect();
        shaped(self.dims(), elements, T::DTYPE.element_size())
    }

    /// Edit the array through a mutable ndarray view
    ///
    /// Every change made inside `f` is written back into the store once it
    /// returns. `T` must match the current dtype.
    pub fn with_numpy_mut<T, R>(&mut self, f: impl FnOnce(ArrayViewMutD<'_, T>) -> R) -> Result<R>
    where
        T: ArrayType,
    {
        let mut arr = self.to_ndarray::<T>()?;
        let result = f(arr.view_mut());
        self.from_bytes(le_bytes(&arr))?;
        Ok(result)
    }
}

fn shaped<T>(dims: &[usize], elements: Vec<T>, element_size: usize) -> Result<ArrayD<T>> {
    let actual = elements.len() * element_size;
    ArrayD::from_shape_vec(IxDyn(dims), elements).map_err(|_| ArrayError::SizeMismatch {
        expected: dims.iter().product::<usize>() * element_size,
        actual,
    })
}
