//! Integration tests for typedarray
//!
//! These tests walk the public codec surface the way a payload layer uses it.

use serde_json::json;
use typedarray::{ArrayError, DType, IndexError, Payload, Resolved, Scalar, TypedArray};

// =============================================================================
// Construction and type codes
// =============================================================================

#[test]
fn default_construction() {
    let arr = TypedArray::default();
    assert_eq!(arr.dims(), &[1, 1]);
    assert_eq!(arr.dtype(), DType::F64);
    assert_eq!(arr.to_json(), json!([[0.0]]));
}

#[test]
fn unknown_type_code() {
    assert!(matches!(
        DType::resolve("bogus"),
        Err(ArrayError::UnknownType { .. })
    ));
    assert!(TypedArray::default().set_dtype("bogus").is_err());
}

#[test]
fn aliases_observe_canonical_type() {
    let mut a = TypedArray::default();
    let mut b = TypedArray::default();
    a.set_dtype("uint64").unwrap();
    b.set_dtype("Q").unwrap();
    assert_eq!(a.dtype(), b.dtype());
    assert_eq!(a.dtype().to_string(), "uint64");
    assert_eq!(a.dtype().to_external(), "<u8");
}

#[test]
fn retype_is_not_reinterpretation() {
    let mut arr = TypedArray::new(DType::F32, vec![2]).unwrap();
    arr.set(0, 1.0).unwrap();
    arr.set_dtype("u4").unwrap();
    // 1.0f32 reinterpreted would be 0x3F800000
    assert_eq!(arr.get(0).unwrap(), Scalar::UInt(0));
    assert_eq!(arr.to_bytes(), vec![0; 8]);
}

// =============================================================================
// Indexing
// =============================================================================

#[test]
fn index_resolution() {
    let mut arr = TypedArray::default();
    arr.set_shape(vec![1, 2]).unwrap();
    assert_eq!(arr.resolve_index([0, 1]).unwrap(), Resolved::Offset(1));
    assert_eq!(
        arr.resolve_index("label").unwrap(),
        Resolved::Label("label".into())
    );
}

#[test]
fn out_of_range_and_wrong_rank() {
    let arr = TypedArray::new(DType::I8, vec![2, 2]).unwrap();
    assert!(matches!(
        arr.get(4),
        Err(ArrayError::Index(IndexError::OutOfRange { index: 4, len: 4 }))
    ));
    assert!(matches!(
        arr.get([0, 0, 0]),
        Err(ArrayError::Index(IndexError::WrongRank { .. }))
    ));
    assert!(matches!(
        arr.get([2, 0]),
        Err(ArrayError::Index(IndexError::AxisOutOfRange { axis: 0, .. }))
    ));
}

// =============================================================================
// Element writes
// =============================================================================

#[test]
fn string_write_reads_bytes() {
    let mut arr = TypedArray::default();
    arr.set_dtype("S4").unwrap();
    arr.set(0, "a").unwrap();
    let value = arr.get(0).unwrap();
    assert_eq!(value, Scalar::Bytes(vec![b'a', 0, 0, 0]));
    assert!(!matches!(value, Scalar::Text(_)));
}

#[test]
fn type_mismatch_leaves_store() {
    let mut arr = TypedArray::new(DType::I32, vec![2, 2]).unwrap();
    arr.set((1, 1), 42).unwrap();
    let before = arr.to_bytes();

    assert!(matches!(
        arr.set((1, 1), "text"),
        Err(ArrayError::TypeMismatch { .. })
    ));
    assert!(matches!(
        arr.set((1, 1), 0.5),
        Err(ArrayError::TypeMismatch { .. })
    ));
    assert!(matches!(
        arr.set((1, 1), i64::MAX),
        Err(ArrayError::TypeMismatch { .. })
    ));
    assert_eq!(arr.to_bytes(), before);
}

// =============================================================================
// Byte buffers
// =============================================================================

#[test]
fn bytes_are_row_major_little_endian() {
    let mut arr = TypedArray::new(DType::U16, vec![2, 2]).unwrap();
    arr.set((0, 1), 0x0102u32).unwrap();
    arr.set((1, 0), 0x0304u32).unwrap();
    assert_eq!(arr.to_bytes(), vec![0, 0, 0x02, 0x01, 0x04, 0x03, 0, 0]);
}

#[test]
fn from_bytes_size_mismatch() {
    let mut arr = TypedArray::new(DType::F32, vec![2, 3]).unwrap();
    assert_eq!(
        arr.from_bytes(vec![0u8; 20]),
        Err(ArrayError::SizeMismatch {
            expected: 24,
            actual: 20
        })
    );

    let data: Vec<u8> = (0..24).collect();
    arr.from_bytes(data.clone()).unwrap();
    assert_eq!(arr.to_bytes(), data);
}

// =============================================================================
// Lists
// =============================================================================

#[test]
fn list_roundtrip() {
    let rows = vec![
        vec![Scalar::Float(1.5), Scalar::Float(-2.0)],
        vec![Scalar::Float(0.0), Scalar::Float(1e10)],
    ];
    let mut arr = TypedArray::default();
    arr.from_2dlist(rows.clone()).unwrap();
    assert_eq!(arr.to_2dlist(), rows);
}

#[test]
fn empty_list_import() {
    let mut arr = TypedArray::default();
    arr.from_2dlist(Vec::<Vec<Scalar>>::new()).unwrap();
    assert_eq!(arr.count(false), 0);
    assert!(arr.is_empty());
    assert!(arr.to_bytes().is_empty());
}

// =============================================================================
// JSON
// =============================================================================

#[test]
fn json_mixed_text() {
    let mut arr = TypedArray::default();
    arr.from_json(&json!([["alpha", "b"], ["c", "delta"]])).unwrap();
    assert_eq!(arr.dtype(), DType::Bytes(5));
    assert_eq!(arr.count(true), 20);
    assert_eq!(arr.to_json(), json!([["alpha", "b"], ["c", "delta"]]));
}

// =============================================================================
// Payload envelope
// =============================================================================

#[test]
fn payload_carries_metadata() {
    let mut arr = TypedArray::new(DType::I64, vec![3]).unwrap();
    arr.set(2, -9).unwrap();

    let body = json!({ "item": "table", "values": arr });
    let text = serde_json::to_string(&body).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    let payload: Payload = serde_json::from_value(parsed["values"].clone()).unwrap();
    assert_eq!(payload.dtype, "<i8");
    assert_eq!(payload.shape, vec![3]);

    let back = TypedArray::from_payload(&payload).unwrap();
    assert_eq!(back, arr);
}

// =============================================================================
// Self check
// =============================================================================

#[test]
fn self_check() {
    TypedArray::self_check().unwrap();
}
