//! Element decoding

use crate::types::{DType, Scalar};

/// Decode one element from exactly `dtype.element_size()` little-endian bytes
///
/// Byte strings come back at full width, padding included.
pub fn read_element(dtype: DType, bytes: &[u8]) -> Scalar {
    debug_assert_eq!(bytes.len(), dtype.element_size());
    match dtype {
        DType::I8 => Scalar::Int(i8::from_le_bytes(le(bytes)).into()),
        DType::I16 => Scalar::Int(i16::from_le_bytes(le(bytes)).into()),
        DType::I32 => Scalar::Int(i32::from_le_bytes(le(bytes)).into()),
        DType::I64 => Scalar::Int(i64::from_le_bytes(le(bytes))),
        DType::U8 => Scalar::UInt(bytes[0].into()),
        DType::U16 => Scalar::UInt(u16::from_le_bytes(le(bytes)).into()),
        DType::U32 => Scalar::UInt(u32::from_le_bytes(le(bytes)).into()),
        DType::U64 => Scalar::UInt(u64::from_le_bytes(le(bytes))),
        DType::F32 => Scalar::Float(f32::from_le_bytes(le(bytes)).into()),
        DType::F64 => Scalar::Float(f64::from_le_bytes(le(bytes))),
        DType::Bytes(_) => Scalar::Bytes(bytes.to_vec()),
    }
}

fn le<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut arr = [0u8; N];
    arr.copy_from_slice(&bytes[..N]);
    arr
}
