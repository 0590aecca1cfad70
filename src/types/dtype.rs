//! Element types and the type-code vocabulary

use crate::error::{ArrayError, Result};
use std::fmt;
use std::str::FromStr;

/// Data type of a typed array element
///
/// Every variant has a fixed element width. Byte strings carry their
/// width in the variant itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DType {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    #[default]
    F64,
    /// Fixed-width byte string, zero padded
    Bytes(usize),
}

/// Every spelling accepted for a numeric type, mapped to its canonical type.
///
/// Consulted once when a code is assigned; nothing downstream compares
/// code strings.
const ALIASES: &[(&str, DType)] = &[
    // canonical names
    ("int8", DType::I8),
    ("int16", DType::I16),
    ("int32", DType::I32),
    ("int64", DType::I64),
    ("uint8", DType::U8),
    ("uint16", DType::U16),
    ("uint32", DType::U32),
    ("uint64", DType::U64),
    ("float32", DType::F32),
    ("float64", DType::F64),
    // numpy short codes
    ("i1", DType::I8),
    ("i2", DType::I16),
    ("i4", DType::I32),
    ("i8", DType::I64),
    ("u1", DType::U8),
    ("u2", DType::U16),
    ("u4", DType::U32),
    ("u8", DType::U64),
    ("f4", DType::F32),
    ("f8", DType::F64),
    // struct-style format characters
    ("b", DType::I8),
    ("B", DType::U8),
    ("h", DType::I16),
    ("H", DType::U16),
    ("i", DType::I32),
    ("I", DType::U32),
    ("q", DType::I64),
    ("Q", DType::U64),
    ("f", DType::F32),
    ("d", DType::F64),
    // C names
    ("byte", DType::I8),
    ("ubyte", DType::U8),
    ("short", DType::I16),
    ("ushort", DType::U16),
    ("intc", DType::I32),
    ("uintc", DType::U32),
    ("longlong", DType::I64),
    ("ulonglong", DType::U64),
    ("single", DType::F32),
    ("double", DType::F64),
    ("float", DType::F64),
];

impl DType {
    /// All fixed numeric types, in canonical order
    pub const NUMERIC: [DType; 10] = [
        DType::I8,
        DType::I16,
        DType::I32,
        DType::I64,
        DType::U8,
        DType::U16,
        DType::U32,
        DType::U64,
        DType::F32,
        DType::F64,
    ];

    /// Canonicalize a type code or one of its aliases
    pub fn resolve(code: &str) -> Result<Self> {
        let trimmed = code.trim();
        let body = trimmed.strip_prefix(['<', '|', '=']).unwrap_or(trimmed);

        if let Some((_, dtype)) = ALIASES.iter().find(|(alias, _)| *alias == body) {
            return Ok(*dtype);
        }

        parse_string_width(body)
            .map(DType::Bytes)
            .ok_or_else(|| ArrayError::UnknownType {
                code: code.to_string(),
            })
    }

    /// Size in bytes of a single element
    pub fn element_size(self) -> usize {
        match self {
            DType::U8 | DType::I8 => 1,
            DType::U16 | DType::I16 => 2,
            DType::U32 | DType::I32 | DType::F32 => 4,
            DType::U64 | DType::I64 | DType::F64 => 8,
            DType::Bytes(width) => width,
        }
    }

    /// numpy array-protocol type string, e.g. `<u8` or `|S3`
    pub fn to_external(self) -> String {
        match self {
            DType::I8 => "|i1".into(),
            DType::I16 => "<i2".into(),
            DType::I32 => "<i4".into(),
            DType::I64 => "<i8".into(),
            DType::U8 => "|u1".into(),
            DType::U16 => "<u2".into(),
            DType::U32 => "<u4".into(),
            DType::U64 => "<u8".into(),
            DType::F32 => "<f4".into(),
            DType::F64 => "<f8".into(),
            DType::Bytes(width) => format!("|S{}", width),
        }
    }

    /// Check a dtype built directly rather than through [`DType::resolve`]
    ///
    /// Byte strings need a width of at least one byte.
    pub fn validate(self) -> Result<Self> {
        match self {
            DType::Bytes(0) => Err(ArrayError::UnknownType {
                code: self.to_string(),
            }),
            _ => Ok(self),
        }
    }

    /// Inverse of [`DType::to_external`]
    pub fn from_external(code: &str) -> Result<Self> {
        Self::resolve(code)
    }

    pub fn is_string(self) -> bool {
        matches!(self, DType::Bytes(_))
    }

    pub fn is_float(self) -> bool {
        matches!(self, DType::F32 | DType::F64)
    }

    pub fn is_signed(self) -> bool {
        matches!(self, DType::I8 | DType::I16 | DType::I32 | DType::I64)
    }

    pub fn is_unsigned(self) -> bool {
        matches!(self, DType::U8 | DType::U16 | DType::U32 | DType::U64)
    }
}

/// Width of a byte-string code: `S4`, `a4`, `bytes4` or `4s`
fn parse_string_width(body: &str) -> Option<usize> {
    let digits = body
        .strip_prefix("bytes")
        .or_else(|| body.strip_prefix('S'))
        .or_else(|| body.strip_prefix('a'))
        .or_else(|| body.strip_suffix('s'))?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().filter(|&width| width > 0)
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DType::I8 => write!(f, "int8"),
            DType::I16 => write!(f, "int16"),
            DType::I32 => write!(f, "int32"),
            DType::I64 => write!(f, "int64"),
            DType::U8 => write!(f, "uint8"),
            DType::U16 => write!(f, "uint16"),
            DType::U32 => write!(f, "uint32"),
            DType::U64 => write!(f, "uint64"),
            DType::F32 => write!(f, "float32"),
            DType::F64 => write!(f, "float64"),
            DType::Bytes(width) => write!(f, "S{}", width),
        }
    }
}

impl FromStr for DType {
    type Err = ArrayError;

    fn from_str(s: &str) -> Result<Self> {
        Self::resolve(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_share_canonical_type() {
        for code in ["uint64", "u8", "<u8", "Q", "ulonglong", " uint64 "] {
            assert_eq!(DType::resolve(code).unwrap(), DType::U64, "{}", code);
        }
        assert_eq!(DType::resolve("i8").unwrap(), DType::I64);
        assert_eq!(DType::resolve("float").unwrap(), DType::F64);
        assert_eq!(DType::resolve("|i1").unwrap(), DType::I8);
    }

    #[test]
    fn string_codes() {
        assert_eq!(DType::resolve("S4").unwrap(), DType::Bytes(4));
        assert_eq!(DType::resolve("|S12").unwrap(), DType::Bytes(12));
        assert_eq!(DType::resolve("a3").unwrap(), DType::Bytes(3));
        assert_eq!(DType::resolve("7s").unwrap(), DType::Bytes(7));
        assert_eq!(DType::resolve("bytes2").unwrap(), DType::Bytes(2));
        assert_eq!(DType::Bytes(4).element_size(), 4);
    }

    #[test]
    fn rejects_unknown_codes() {
        for code in ["bogus", "", "S", "S0", "Sx", ">u8", "s", "int128"] {
            assert!(
                matches!(DType::resolve(code), Err(ArrayError::UnknownType { .. })),
                "{}",
                code
            );
        }
    }

    #[test]
    fn zero_width_string_invalid() {
        assert_eq!(
            DType::Bytes(0).validate(),
            Err(ArrayError::UnknownType { code: "S0".into() })
        );
        assert_eq!(DType::Bytes(1).validate().unwrap(), DType::Bytes(1));
        assert_eq!(DType::U16.validate().unwrap(), DType::U16);
    }

    #[test]
    fn external_vocabulary_roundtrip() {
        let mut all = DType::NUMERIC.to_vec();
        all.push(DType::Bytes(3));
        for dtype in all {
            let external = dtype.to_external();
            assert_eq!(DType::from_external(&external).unwrap(), dtype, "{}", external);
        }
        assert_eq!(DType::Bytes(3).to_external(), "|S3");
    }

    #[test]
    fn element_sizes() {
        assert_eq!(DType::I8.element_size(), 1);
        assert_eq!(DType::U16.element_size(), 2);
        assert_eq!(DType::F32.element_size(), 4);
        assert_eq!(DType::F64.element_size(), 8);
        assert_eq!(DType::U64.element_size(), 8);
    }

    #[test]
    fn display_is_canonical() {
        assert_eq!(DType::resolve("Q").unwrap().to_string(), "uint64");
        assert_eq!("|S5".parse::<DType>().unwrap().to_string(), "S5");
    }
}
