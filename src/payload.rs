//! Self-describing envelope for carrying a typed array inside a larger body
//!
//! The raw buffer has no header, so dtype and shape travel next to it:
//!
//! ```json
//! { "dtype": "<f8", "shape": [1, 2], "data": "AAAAAAAA8D8AAAAAAAAAQA==" }
//! ```

use crate::array::TypedArray;
use crate::error::Result;
use crate::types::DType;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Typed array metadata plus base64 encoded buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// External dtype string, e.g. `<u8` or `|S4`
    pub dtype: String,
    pub shape: Vec<usize>,
    #[serde(with = "base64_data")]
    pub data: Vec<u8>,
}

impl TypedArray {
    pub fn to_payload(&self) -> Payload {
        Payload {
            dtype: self.dtype().to_external(),
            shape: self.dims().to_vec(),
            data: self.to_bytes(),
        }
    }

    /// Rebuild an array, checking dtype and buffer size
    pub fn from_payload(payload: &Payload) -> Result<Self> {
        let dtype = DType::from_external(&payload.dtype)?;
        TypedArray::from_parts(dtype, payload.shape.clone(), payload.data.clone())
    }
}

impl Serialize for TypedArray {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_payload().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TypedArray {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let payload = Payload::deserialize(deserializer)?;
        TypedArray::from_payload(&payload).map_err(serde::de::Error::custom)
    }
}

mod base64_data {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}
