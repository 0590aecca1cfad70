//! Nested row/column list conversions
//!
//! `to_2dlist` always produces a two-level list. The first dimension is the
//! row axis and every remaining dimension is flattened, row-major, into the
//! column axis:
//!
//! | shape          | rows | columns         |
//! |----------------|------|-----------------|
//! | `(n,)`         | `n`  | `1`             |
//! | `(r, c)`       | `r`  | `c`             |
//! | `(a, b, c..)`  | `a`  | `b * c * ..`    |
//!
//! For rank >= 3 this loses the trailing geometry; callers that need it
//! back must carry the shape alongside the list.

use crate::array::{TypedArray, byte_len};
use crate::error::{ArrayError, Result};
use crate::store::BufferStore;
use crate::types::{DType, Scalar, Shape};

/// Input accepted by [`TypedArray::from_2dlist`]
#[derive(Debug, Clone, PartialEq)]
pub enum ListInput {
    /// Bare value, broadcast into a `(1, 1)` array
    Scalar(Scalar),
    /// Flat list, taken as a single row
    Flat(Vec<Scalar>),
    /// Outer list of equally long rows
    Rows(Vec<Vec<Scalar>>),
}

impl From<Scalar> for ListInput {
    fn from(v: Scalar) -> Self {
        ListInput::Scalar(v)
    }
}

impl From<Vec<Scalar>> for ListInput {
    fn from(v: Vec<Scalar>) -> Self {
        ListInput::Flat(v)
    }
}

impl From<Vec<Vec<Scalar>>> for ListInput {
    fn from(v: Vec<Vec<Scalar>>) -> Self {
        ListInput::Rows(v)
    }
}

impl TypedArray {
    /// Populate from nested rows of scalars
    ///
    /// Shape and dtype are taken from the input (see [`infer_dtype`]). An
    /// empty outer list gives a zero-element array of shape `(0,)` and keeps
    /// the current dtype. On failure the array is unchanged.
    pub fn from_2dlist(&mut self, rows: impl Into<ListInput>) -> Result<()> {
        let (dims, values) = match rows.into() {
            ListInput::Scalar(value) => (vec![1, 1], vec![value]),
            ListInput::Flat(values) if values.is_empty() => (vec![0], values),
            ListInput::Flat(values) => (vec![1, values.len()], values),
            ListInput::Rows(rows) if rows.is_empty() => (vec![0], Vec::new()),
            ListInput::Rows(rows) => {
                let cols = rows[0].len();
                if let Some((row, actual)) = rows
                    .iter()
                    .map(Vec::len)
                    .enumerate()
                    .find(|&(_, len)| len != cols)
                {
                    return Err(ArrayError::Ragged {
                        row,
                        expected: cols,
                        actual,
                    });
                }
                (vec![rows.len(), cols], rows.into_iter().flatten().collect())
            }
        };

        let dtype = infer_dtype(&values)?.unwrap_or(self.dtype());
        *self = build(dtype, dims, &values)?;
        Ok(())
    }

    /// Export as rows of scalars, flattening trailing dimensions into columns
    pub fn to_2dlist(&self) -> Vec<Vec<Scalar>> {
        let rows = self.dims()[0];
        let cols: usize = if self.rank() == 1 {
            1
        } else {
            self.dims()[1..].iter().product()
        };
        if cols == 0 {
            return vec![Vec::new(); rows];
        }

        let values: Vec<Scalar> = self.iter().collect();
        values.chunks(cols).map(<[Scalar]>::to_vec).collect()
    }
}

/// Pick the narrowest common dtype for a set of values
///
/// Integers that are all `UInt` give uint64. Signed, or signed mixed with
/// unsigned, give int64, switching to uint64 once an unsigned value exceeds
/// `i64::MAX` (a negative value then cannot be stored). Any float among
/// numbers gives float64. Text and bytes give a byte
/// string as wide as the longest value. Mixing text with numbers is a
/// type mismatch. Returns `None` for no values.
pub(crate) fn infer_dtype(values: &[Scalar]) -> Result<Option<DType>> {
    if values.is_empty() {
        return Ok(None);
    }

    let mut width = 0;
    let mut first_text = None;
    let mut first_number = None;
    let mut first_negative = None;
    let mut any_float = false;
    let mut any_signed = false;
    let mut any_big = false;

    for value in values {
        match value {
            Scalar::Text(_) | Scalar::Bytes(_) => {
                width = width.max(value.as_bytes().map_or(0, <[u8]>::len));
                first_text.get_or_insert(value);
            }
            Scalar::Int(i) => {
                first_number.get_or_insert(value);
                any_signed = true;
                if *i < 0 {
                    first_negative.get_or_insert(value);
                }
            }
            Scalar::UInt(u) => {
                first_number.get_or_insert(value);
                any_big |= *u > i64::MAX as u64;
            }
            Scalar::Float(_) => {
                first_number.get_or_insert(value);
                any_float = true;
            }
        }
    }

    let text_dtype = DType::Bytes(width.max(1));
    match (first_text, first_number) {
        (Some(_), Some(number)) => Err(ArrayError::mismatch(text_dtype, number)),
        (Some(_), None) => Ok(Some(text_dtype)),
        _ if any_float => Ok(Some(DType::F64)),
        _ if !any_signed => Ok(Some(DType::U64)),
        _ if any_big => match first_negative {
            Some(negative) => Err(ArrayError::mismatch(DType::U64, negative)),
            None => Ok(Some(DType::U64)),
        },
        _ => Ok(Some(DType::I64)),
    }
}

/// Fresh array holding `values` in flat order
pub(crate) fn build(dtype: DType, dims: Vec<usize>, values: &[Scalar]) -> Result<TypedArray> {
    let shape = Shape::new(dims)?;
    let mut store = BufferStore::allocate(byte_len(&shape, dtype)?);
    for (offset, value) in values.iter().enumerate() {
        store.write_element(offset, dtype, value)?;
    }
    Ok(TypedArray::from_validated(dtype, shape, store))
}
