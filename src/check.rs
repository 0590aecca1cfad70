//! Diagnostic round trip through every representation

use crate::array::TypedArray;
use crate::error::{ArrayError, Result};
use crate::types::{DType, Scalar};

impl TypedArray {
    /// Build small int, float and byte-string arrays, export each through
    /// bytes, lists, JSON and (with the `ndarray` feature) ndarray, import
    /// the result again and compare.
    ///
    /// Diagnostic only; nothing else depends on it.
    pub fn self_check() -> Result<()> {
        let samples: [Vec<Vec<Scalar>>; 3] = [
            vec![
                vec![Scalar::Int(-1), Scalar::Int(2)],
                vec![Scalar::Int(i64::MAX), Scalar::Int(0)],
            ],
            vec![vec![Scalar::Float(0.5), Scalar::Float(-1e300), Scalar::Float(3.0)]],
            vec![
                vec![Scalar::from("abc")],
                vec![Scalar::from("d")],
                vec![Scalar::Bytes(vec![0xFF, 0x01, 0x02])],
            ],
        ];

        for rows in samples {
            let mut original = TypedArray::default();
            original.from_2dlist(rows.clone())?;
            log::debug!(
                "self check on {} array of shape {}",
                original.dtype(),
                original.shape()
            );

            let bytes =
                TypedArray::from_parts(original.dtype(), original.dims(), original.to_bytes())?;
            expect(bytes == original, "bytes")?;

            let mut listed = TypedArray::default();
            listed.from_2dlist(original.to_2dlist())?;
            expect(listed == original, "2dlist")?;

            let mut json = TypedArray::default();
            json.from_json(&original.to_json())?;
            expect(json == original, "json")?;

            #[cfg(feature = "ndarray")]
            {
                let mut numpy = TypedArray::default();
                numpy.from_numpy(&original.to_numpy()?)?;
                expect(numpy == original, "numpy")?;
            }

            expect(original.to_2dlist() == rows_as_read(&rows, original.dtype()), "values")?;
        }
        Ok(())
    }
}

fn expect(ok: bool, stage: &'static str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(ArrayError::CheckFailed { stage })
    }
}

/// Rows as the array reads them back: text becomes padded bytes
fn rows_as_read(rows: &[Vec<Scalar>], dtype: DType) -> Vec<Vec<Scalar>> {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|value| match (dtype, value.as_bytes()) {
                    (DType::Bytes(width), Some(raw)) => {
                        let mut padded = raw.to_vec();
                        padded.resize(width, 0);
                        Scalar::Bytes(padded)
                    }
                    _ => value.clone(),
                })
                .collect()
        })
        .collect()
}
