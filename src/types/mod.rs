//! Core value types for typed arrays

mod dtype;
mod index;
mod scalar;
mod shape;

pub use dtype::DType;
pub use index::{Index, Resolved};
pub use scalar::Scalar;
pub use shape::Shape;
