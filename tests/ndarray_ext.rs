//! Integration tests for ndarray support
//!
//! Covers the external array boundary: dtype strings, copies and the
//! write-back view.

#![cfg(feature = "ndarray")]

use ndarray::{ArrayD, IxDyn, array, s};
use typedarray::{DType, NdArray, Scalar, TypedArray};

// =============================================================================
// Import / export
// =============================================================================

#[test]
fn roundtrip_ndarray_3d() {
    let tensor = ArrayD::<i32>::from_shape_fn(IxDyn(&[2, 3, 4]), |idx| {
        (idx[0] * 12 + idx[1] * 4 + idx[2]) as i32
    });
    let mut arr = TypedArray::default();
    arr.from_numpy(&tensor.clone().into()).unwrap();

    assert_eq!(arr.dtype(), DType::I32);
    assert_eq!(arr.dims(), &[2, 3, 4]);
    assert_eq!(arr.get([1, 2, 3]).unwrap(), Scalar::Int(23));

    let back = arr.to_numpy().unwrap();
    assert_eq!(back.dtype_str(), "<i4");
    assert_eq!(back.as_array::<i32>(), Some(&tensor));
}

#[test]
fn sliced_input_is_copied_in_order() {
    let full = array![[1.0f64, 2.0, 3.0], [4.0, 5.0, 6.0]];
    let column = full.slice(s![.., 1]).to_owned().into_dyn();

    let mut arr = TypedArray::default();
    arr.from_numpy(&NdArray::F64(column)).unwrap();
    assert_eq!(arr.dims(), &[2]);
    let values: Vec<Scalar> = arr.iter().collect();
    assert_eq!(values, vec![Scalar::Float(2.0), Scalar::Float(5.0)]);
}

#[test]
fn mixed_dtype_arrays() {
    let u8_data = array![255u8, 128, 0].into_dyn();
    let i16_data = array![-1000i16, 0, 1000].into_dyn();
    let f32_data = array![0.25f32, -0.5].into_dyn();

    for external in [
        NdArray::from(u8_data),
        NdArray::from(i16_data),
        NdArray::from(f32_data),
    ] {
        let mut arr = TypedArray::default();
        arr.from_numpy(&external).unwrap();
        assert_eq!(arr.dtype().to_external(), external.dtype_str());
        assert_eq!(arr.to_numpy().unwrap(), external);
    }
}

#[test]
fn list_json_and_numpy_agree() {
    let matrix = array![[1i64, 2], [3, 4]].into_dyn();
    let mut arr = TypedArray::default();
    arr.from_numpy(&matrix.into()).unwrap();

    assert_eq!(
        arr.to_2dlist(),
        vec![
            vec![Scalar::Int(1), Scalar::Int(2)],
            vec![Scalar::Int(3), Scalar::Int(4)],
        ]
    );
    assert_eq!(arr.to_json(), serde_json::json!([[1, 2], [3, 4]]));
}

// =============================================================================
// Read-only copies vs write-back views
// =============================================================================

#[test]
fn exported_copy_is_isolated() {
    let mut arr = TypedArray::new(DType::F64, vec![2, 2]).unwrap();
    arr.set((0, 0), 1.0).unwrap();

    let mut exported = arr.to_numpy().unwrap();
    if let NdArray::F64(ref mut a) = exported {
        a[[0, 0]] = 99.0;
        a[[1, 1]] = 7.0;
    }

    // edit visible in the copy, not in the store
    assert_eq!(exported.as_array::<f64>().unwrap()[[0, 0]], 99.0);
    assert_eq!(arr.get((0, 0)).unwrap(), Scalar::Float(1.0));
    assert_eq!(arr.get((1, 1)).unwrap(), Scalar::Float(0.0));
}

#[test]
fn writeable_view_writes_back() {
    let mut arr = TypedArray::new(DType::U32, vec![2, 3]).unwrap();

    let sum = arr
        .with_numpy_mut::<u32, _>(|mut view| {
            view[[1, 2]] = 12;
            view.slice_mut(s![0, ..]).fill(5);
            view.sum()
        })
        .unwrap();

    assert_eq!(sum, 27);
    assert_eq!(arr.get((1, 2)).unwrap(), Scalar::UInt(12));
    assert_eq!(arr.get((0, 1)).unwrap(), Scalar::UInt(5));
    assert_eq!(arr.get((1, 0)).unwrap(), Scalar::UInt(0));
}

#[test]
fn writeable_view_requires_matching_type() {
    let mut arr = TypedArray::new(DType::I16, vec![2]).unwrap();
    let before = arr.clone();
    assert!(arr.with_numpy_mut::<f32, _>(|mut v| v.fill(1.0)).is_err());
    assert_eq!(arr, before);
}
