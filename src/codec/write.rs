//! Element encoding

use crate::error::{ArrayError, Result};
use crate::types::{DType, Scalar};

/// Encode a value into exactly `dtype.element_size()` little-endian bytes
///
/// Nothing is written anywhere on failure; callers copy the returned bytes
/// into place only after encoding succeeded.
pub fn encode_element(dtype: DType, value: &Scalar) -> Result<Vec<u8>> {
    match (dtype, value) {
        (DType::Bytes(width), Scalar::Text(text)) => Ok(pad_to(width, text.as_bytes())),
        (DType::Bytes(width), Scalar::Bytes(raw)) => Ok(pad_to(width, raw)),
        (DType::F32, Scalar::Int(i)) => Ok((*i as f32).to_le_bytes().to_vec()),
        (DType::F32, Scalar::UInt(u)) => Ok((*u as f32).to_le_bytes().to_vec()),
        (DType::F32, Scalar::Float(f)) => Ok((*f as f32).to_le_bytes().to_vec()),
        (DType::F64, Scalar::Int(i)) => Ok((*i as f64).to_le_bytes().to_vec()),
        (DType::F64, Scalar::UInt(u)) => Ok((*u as f64).to_le_bytes().to_vec()),
        (DType::F64, Scalar::Float(f)) => Ok(f.to_le_bytes().to_vec()),
        (_, Scalar::Int(i)) => encode_integer(dtype, i128::from(*i), value),
        (_, Scalar::UInt(u)) => encode_integer(dtype, i128::from(*u), value),
        _ => Err(ArrayError::mismatch(dtype, value)),
    }
}

/// Zero-padded or truncated copy of `raw`, exactly `width` bytes long
fn pad_to(width: usize, raw: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; width];
    let n = raw.len().min(width);
    out[..n].copy_from_slice(&raw[..n]);
    out
}

/// Pack an integer, rejecting values outside the target range
fn encode_integer(dtype: DType, wide: i128, value: &Scalar) -> Result<Vec<u8>> {
    let packed = match dtype {
        DType::I8 => i8::try_from(wide).map(|v| v.to_le_bytes().to_vec()),
        DType::I16 => i16::try_from(wide).map(|v| v.to_le_bytes().to_vec()),
        DType::I32 => i32::try_from(wide).map(|v| v.to_le_bytes().to_vec()),
        DType::I64 => i64::try_from(wide).map(|v| v.to_le_bytes().to_vec()),
        DType::U8 => u8::try_from(wide).map(|v| v.to_le_bytes().to_vec()),
        DType::U16 => u16::try_from(wide).map(|v| v.to_le_bytes().to_vec()),
        DType::U32 => u32::try_from(wide).map(|v| v.to_le_bytes().to_vec()),
        DType::U64 => u64::try_from(wide).map(|v| v.to_le_bytes().to_vec()),
        _ => return Err(ArrayError::mismatch(dtype, value)),
    };
    packed.map_err(|_| ArrayError::mismatch(dtype, value))
}
