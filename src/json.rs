//! JSON export and import
//!
//! JSON keeps the full rank: an array of shape `(a, b, c)` becomes three
//! levels of nested arrays. Numbers stay numbers, non-finite floats become
//! `null`. Byte-string elements are emitted as text with their zero padding
//! stripped; elements that are not valid UTF-8 follow [`TextFallback`].

use crate::array::TypedArray;
use crate::error::{ArrayError, Result};
use crate::list::{build, infer_dtype};
use crate::types::Scalar;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Number, Value};

/// Key of the object emitted for non-text byte strings
pub const BASE64_KEY: &str = "base64";

/// What to emit for byte-string elements that are not valid UTF-8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFallback {
    /// `{"base64": "<standard base64 of the full element>"}`
    #[default]
    Base64,
    /// Text with U+FFFD replacement characters
    Lossy,
}

/// Options for [`TypedArray::to_json_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JsonOptions {
    pub text_fallback: TextFallback,
}

impl TypedArray {
    /// JSON form with default options
    pub fn to_json(&self) -> Value {
        self.to_json_with(&JsonOptions::default())
    }

    pub fn to_json_with(&self, options: &JsonOptions) -> Value {
        let mut values = self.iter().map(|scalar| scalar_to_json(scalar, options));
        nest(self.dims(), &mut values)
    }

    /// Populate from a JSON payload
    ///
    /// Nesting depth gives the rank and the first element at every level
    /// gives the dimension sizes; every other level must match. A bare
    /// scalar becomes a `(1, 1)` array, `[]` a zero-element array keeping
    /// the current dtype. Strings import as text, `{"base64": ..}` objects
    /// as raw bytes and `null` as NaN. On failure the array is unchanged.
    pub fn from_json(&mut self, value: &Value) -> Result<()> {
        let mut dims = probe_dims(value);
        let mut values = Vec::new();
        flatten(value, &dims, 0, &mut values)?;
        if dims.is_empty() {
            dims = vec![1, 1];
        }

        let dtype = infer_dtype(&values)?.unwrap_or(self.dtype());
        *self = build(dtype, dims, &values)?;
        Ok(())
    }
}

fn scalar_to_json(scalar: Scalar, options: &JsonOptions) -> Value {
    match scalar {
        Scalar::Int(i) => Value::from(i),
        Scalar::UInt(u) => Value::from(u),
        Scalar::Float(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        Scalar::Text(s) => Value::String(s),
        Scalar::Bytes(bytes) => {
            let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
            match (std::str::from_utf8(&bytes[..end]), options.text_fallback) {
                (Ok(text), _) => Value::String(text.to_string()),
                (Err(_), TextFallback::Lossy) => {
                    Value::String(String::from_utf8_lossy(&bytes[..end]).into_owned())
                }
                (Err(_), TextFallback::Base64) => {
                    let mut obj = Map::new();
                    obj.insert(BASE64_KEY.into(), Value::String(STANDARD.encode(&bytes)));
                    Value::Object(obj)
                }
            }
        }
    }
}

fn nest(dims: &[usize], values: &mut impl Iterator<Item = Value>) -> Value {
    match dims {
        [] => values.next().unwrap_or(Value::Null),
        [len] => Value::Array(values.take(*len).collect()),
        [len, rest @ ..] => Value::Array((0..*len).map(|_| nest(rest, values)).collect()),
    }
}

/// Dimensions along the chain of first elements
fn probe_dims(value: &Value) -> Vec<usize> {
    let mut dims = Vec::new();
    let mut current = value;
    while let Value::Array(items) = current {
        dims.push(items.len());
        match items.first() {
            Some(first) => current = first,
            None => break,
        }
    }
    dims
}

fn flatten(value: &Value, dims: &[usize], position: usize, out: &mut Vec<Scalar>) -> Result<()> {
    match (dims.split_first(), value) {
        (None, Value::Array(_)) => Err(ArrayError::Json(
            "array nested deeper than its siblings".into(),
        )),
        (None, leaf) => {
            out.push(leaf_to_scalar(leaf)?);
            Ok(())
        }
        (Some((&len, rest)), Value::Array(items)) => {
            if items.len() != len {
                return Err(ArrayError::Ragged {
                    row: position,
                    expected: len,
                    actual: items.len(),
                });
            }
            for (i, item) in items.iter().enumerate() {
                flatten(item, rest, i, out)?;
            }
            Ok(())
        }
        (Some(_), _) => Err(ArrayError::Json(
            "scalar found where a nested array was expected".into(),
        )),
    }
}

fn leaf_to_scalar(leaf: &Value) -> Result<Scalar> {
    match leaf {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Scalar::Int(i))
            } else if let Some(u) = n.as_u64() {
                Ok(Scalar::UInt(u))
            } else {
                Ok(Scalar::Float(n.as_f64().unwrap_or(f64::NAN)))
            }
        }
        Value::Null => Ok(Scalar::Float(f64::NAN)),
        Value::String(s) => Ok(Scalar::Text(s.clone())),
        Value::Object(obj) => match obj.get(BASE64_KEY) {
            Some(Value::String(encoded)) if obj.len() == 1 => STANDARD
                .decode(encoded)
                .map(Scalar::Bytes)
                .map_err(|e| ArrayError::Json(format!("invalid base64: {}", e))),
            _ => Err(ArrayError::Json(format!("unsupported object: {}", leaf))),
        },
        Value::Bool(_) => Err(ArrayError::Json(format!("unsupported value: {}", leaf))),
        Value::Array(_) => Err(ArrayError::Json("unexpected nested array".into())),
    }
}
