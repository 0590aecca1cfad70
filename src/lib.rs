//! typedarray - Shape-aware typed byte arrays
//!
//! A [`TypedArray`] owns one contiguous little-endian buffer of fixed-width
//! elements together with its dtype and shape, and converts it between four
//! representations:
//!
//! - a flat byte buffer (`to_bytes` / `from_bytes`), with no header
//! - nested row/column lists of [`Scalar`]s (`to_2dlist` / `from_2dlist`)
//! - ndarray arrays wrapped in [`NdArray`] (`to_numpy` / `from_numpy`)
//! - JSON values (`to_json` / `from_json`)
//!
//! The codec does no I/O. Shape and dtype of a raw buffer travel out of band,
//! for example in a [`Payload`].
//!
//! # Example
//!
//! ```rust
//! use typedarray::{DType, Scalar, TypedArray};
//!
//! let mut arr = TypedArray::default();
//! arr.set_shape(vec![1, 2]).unwrap();
//! arr.set((0, 1), 2.5).unwrap();
//! assert_eq!(arr.get(1).unwrap(), Scalar::Float(2.5));
//!
//! arr.set_dtype("S4").unwrap();
//! arr.set(0, "a").unwrap();
//! assert_eq!(arr.get(0).unwrap(), Scalar::Bytes(b"a\0\0\0".to_vec()));
//! assert_eq!(arr.dtype(), DType::Bytes(4));
//! ```

pub mod array;
mod check;
pub mod codec;
pub mod error;
pub mod json;
pub mod list;
pub mod payload;
pub mod store;
pub mod types;

#[cfg(feature = "ndarray")]
pub mod ndarray_ext;

// Re-export common types at crate root
pub use array::TypedArray;
pub use error::{ArrayError, IndexError, Result};
pub use json::{JsonOptions, TextFallback};
pub use list::ListInput;
pub use payload::Payload;
pub use store::BufferStore;
pub use types::{DType, Index, Resolved, Scalar, Shape};

#[cfg(feature = "ndarray")]
pub use ndarray_ext::{ArrayType, NdArray};
